//! Builders wiring domain services over the configured repositories.

use std::sync::Arc;

use mockable::DefaultClock;

use builders::domain::ports::{
    AccessControl, HouseRepository, ProfessionalRepository, UserAccountRepository,
};
use builders::domain::{
    AccessControlService, ArchitectKind, EngineerKind, HouseService, ProfessionalService,
};
use builders::inbound::http::state::{HttpState, ProfessionalPorts};
use builders::outbound::memory::MemoryStore;
use builders::outbound::persistence::{
    DieselHouseRepository, DieselProfessionalRepository, DieselUserAccountRepository,
};
use builders::outbound::security::{Argon2CredentialHasher, JwtTokenCodec};

use super::ServerConfig;

/// Repositories backing every port.
struct Repositories<H, E, A, U> {
    houses: Arc<H>,
    engineers: Arc<E>,
    architects: Arc<A>,
    accounts: Arc<U>,
}

fn professional_ports<K, P, H>(professionals: Arc<P>, houses: Arc<H>) -> ProfessionalPorts<K>
where
    K: builders::domain::ProfessionalKind,
    P: ProfessionalRepository<K> + 'static,
    H: HouseRepository + 'static,
{
    let service = Arc::new(ProfessionalService::<K, P, H>::new(professionals, houses));
    ProfessionalPorts {
        command: service.clone(),
        query: service,
    }
}

fn assemble<H, E, A, U>(config: &ServerConfig, repos: Repositories<H, E, A, U>) -> HttpState
where
    H: HouseRepository + 'static,
    E: ProfessionalRepository<EngineerKind> + 'static,
    A: ProfessionalRepository<ArchitectKind> + 'static,
    U: UserAccountRepository + 'static,
{
    let tokens = Arc::new(JwtTokenCodec::new(
        &config.tokens,
        Arc::new(DefaultClock),
    ));
    let access: Arc<dyn AccessControl> = Arc::new(AccessControlService::new(
        repos.accounts,
        Arc::new(Argon2CredentialHasher::new()),
        tokens,
    ));
    let houses = Arc::new(HouseService::new(repos.houses.clone()));
    HttpState {
        access,
        houses: houses.clone(),
        houses_query: houses,
        engineers: professional_ports(repos.engineers, repos.houses.clone()),
        architects: professional_ports(repos.architects, repos.houses),
    }
}

/// Build handler state over PostgreSQL when a pool is configured, otherwise
/// over a fresh in-memory store.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            let professionals = Arc::new(DieselProfessionalRepository::new(pool.clone()));
            assemble(
                config,
                Repositories {
                    houses: Arc::new(DieselHouseRepository::new(pool.clone())),
                    engineers: professionals.clone(),
                    architects: professionals,
                    accounts: Arc::new(DieselUserAccountRepository::new(pool.clone())),
                },
            )
        }
        None => {
            let store = Arc::new(MemoryStore::new());
            assemble(
                config,
                Repositories {
                    houses: store.clone(),
                    engineers: store.clone(),
                    architects: store.clone(),
                    accounts: store,
                },
            )
        }
    }
}

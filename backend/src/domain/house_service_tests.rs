//! Tests for the house service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockHouseRepository;
use crate::domain::{ArchitectId, EngineerId, ErrorCode, ProjectName};

fn draft(engineer: Option<i64>, architect: Option<i64>) -> HouseDraft {
    HouseDraft {
        project_name: ProjectName::new("Lakeside").expect("name"),
        engineer: engineer.map(|raw| EngineerId::new(raw).expect("id")),
        architect: architect.map(|raw| ArchitectId::new(raw).expect("id")),
    }
}

fn house_id(raw: i64) -> HouseId {
    HouseId::new(raw).expect("id")
}

#[fixture]
fn repo() -> MockHouseRepository {
    MockHouseRepository::new()
}

#[rstest]
#[tokio::test]
async fn create_returns_the_linked_house(mut repo: MockHouseRepository) {
    let expected = House::new(house_id(1), draft(Some(4), Some(5)));
    let returned = expected.clone();
    repo.expect_create()
        .withf(|draft| draft.engineer.map(EngineerId::get) == Some(4))
        .times(1)
        .return_once(move |_| Ok(returned));

    let service = HouseService::new(Arc::new(repo));
    let house = service
        .create_house(draft(Some(4), Some(5)))
        .await
        .expect("create succeeds");

    assert_eq!(house, expected);
}

#[rstest]
#[case(HouseRepositoryError::missing_engineer(7_i64), "engineerId")]
#[case(HouseRepositoryError::missing_architect(8_i64), "architectId")]
#[tokio::test]
async fn create_with_missing_link_is_invalid_request(
    mut repo: MockHouseRepository,
    #[case] failure: HouseRepositoryError,
    #[case] field: &str,
) {
    repo.expect_create()
        .times(1)
        .return_once(move |_| Err(failure));

    let service = HouseService::new(Arc::new(repo));
    let error = service
        .create_house(draft(Some(7), Some(8)))
        .await
        .expect_err("missing link fails");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details");
    assert_eq!(details["field"], field);
    assert_eq!(details["code"], "not_found");
}

#[rstest]
#[tokio::test]
async fn get_missing_house_is_not_found(mut repo: MockHouseRepository) {
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let service = HouseService::new(Arc::new(repo));
    let error = service
        .get_house(house_id(3))
        .await
        .expect_err("absent house");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn replace_writes_every_field_and_clears_omitted_links(mut repo: MockHouseRepository) {
    let existing = House::new(house_id(2), draft(Some(1), Some(1)));
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_replace()
        .withf(|house| house.engineer().is_none() && house.architect().is_none())
        .times(1)
        .return_once(|_| Ok(true));

    let service = HouseService::new(Arc::new(repo));
    let house = service
        .replace_house(house_id(2), draft(None, None))
        .await
        .expect("replace succeeds");

    assert_eq!(house.id(), house_id(2));
    assert!(house.engineer().is_none());
}

#[rstest]
#[tokio::test]
async fn replace_of_absent_house_never_writes(mut repo: MockHouseRepository) {
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_replace().times(0);

    let service = HouseService::new(Arc::new(repo));
    let error = service
        .replace_house(house_id(2), draft(None, None))
        .await
        .expect_err("absent house");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn replace_racing_a_delete_is_not_found(mut repo: MockHouseRepository) {
    let existing = House::new(house_id(2), draft(None, None));
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_replace().times(1).return_once(|_| Ok(false));

    let service = HouseService::new(Arc::new(repo));
    let error = service
        .replace_house(house_id(2), draft(None, None))
        .await
        .expect_err("row vanished");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_removes_existing_house(mut repo: MockHouseRepository) {
    let existing = House::new(house_id(5), draft(Some(1), None));
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_delete()
        .withf(|id| id.get() == 5)
        .times(1)
        .return_once(|_| Ok(true));

    let service = HouseService::new(Arc::new(repo));
    service
        .delete_house(house_id(5))
        .await
        .expect("delete succeeds");
}

#[rstest]
#[tokio::test]
async fn delete_of_absent_house_is_not_found(mut repo: MockHouseRepository) {
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_delete().times(0);

    let service = HouseService::new(Arc::new(repo));
    let error = service
        .delete_house(house_id(5))
        .await
        .expect_err("absent house");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(HouseRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(HouseRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn infrastructure_failures_are_mapped(
    mut repo: MockHouseRepository,
    #[case] failure: HouseRepositoryError,
    #[case] expected: ErrorCode,
) {
    repo.expect_list().times(1).return_once(move || Err(failure));

    let service = HouseService::new(Arc::new(repo));
    let error = service.list_houses().await.expect_err("list fails");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn find_by_project_name_passes_the_name_through(mut repo: MockHouseRepository) {
    let found = vec![House::new(house_id(1), draft(None, None))];
    let returned = found.clone();
    repo.expect_find_by_project_name()
        .withf(|name| name == "Lakeside")
        .times(1)
        .return_once(move |_| Ok(returned));

    let service = HouseService::new(Arc::new(repo));
    let houses = service
        .find_houses_by_project_name("Lakeside")
        .await
        .expect("find succeeds");

    assert_eq!(houses, found);
}

//! End-to-end behaviour of the REST API over the in-memory store.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use support::{app, authed, create_house, stored_house, token_for};

#[actix_web::test]
async fn protected_routes_need_a_bearer_token() {
    let app = test::init_service(app()).await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/api/v1/houses/all").to_request())
            .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key("trace-id"));
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn tampered_tokens_are_rejected() {
    let app = test::init_service(app()).await;
    let token = token_for(&app, "ada", "USER").await;
    let tampered = format!("{token}x");

    let response = test::call_service(
        &app,
        authed(test::TestRequest::get().uri("/api/v1/houses/all"), &tampered).to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case("/api/v1/houses", json!({"projectName": "Mill"}))]
#[case("/api/v1/engineers", json!({"name": "John Marston"}))]
#[case("/api/v1/architects", json!({"name": "Sadie Adler"}))]
#[actix_web::test]
async fn users_can_read_but_not_write(#[case] uri: &str, #[case] body: Value) {
    let app = test::init_service(app()).await;
    let token = token_for(&app, "reader", "USER").await;

    let read = test::call_service(
        &app,
        authed(test::TestRequest::get().uri(&format!("{uri}/all")), &token).to_request(),
    )
    .await;
    assert_eq!(read.status(), StatusCode::OK);

    let write = test::call_service(
        &app,
        authed(test::TestRequest::post().uri(uri), &token)
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(write.status(), StatusCode::FORBIDDEN);
    let error: Value = test::read_body_json(write).await;
    assert_eq!(error["code"], "forbidden");
}

#[actix_web::test]
async fn duplicate_logins_conflict_and_wrong_passwords_fail() {
    let app = test::init_service(app()).await;
    let _ = token_for(&app, "ada", "USER").await;

    let again = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({"login": "ada", "password": "other", "role": "ADMIN"}))
            .to_request(),
    )
    .await;
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let wrong = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"login": "ada", "password": "nope"}))
            .to_request(),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(wrong).await;
    assert_eq!(body["message"], "invalid credentials");
}

#[actix_web::test]
async fn links_are_kept_consistent_across_resources() {
    let app = test::init_service(app()).await;
    let admin = token_for(&app, "root", "ADMIN").await;

    let engineer: Value = test::call_and_read_body_json(
        &app,
        authed(test::TestRequest::post().uri("/api/v1/engineers"), &admin)
            .set_json(json!({"name": "John Marston"}))
            .to_request(),
    )
    .await;
    let engineer_id = engineer["id"].as_i64().expect("engineer id");

    let architect: Value = test::call_and_read_body_json(
        &app,
        authed(test::TestRequest::post().uri("/api/v1/architects"), &admin)
            .set_json(json!({"name": "Sadie Adler"}))
            .to_request(),
    )
    .await;
    let architect_id = architect["id"].as_i64().expect("architect id");

    let created = test::call_service(
        &app,
        authed(test::TestRequest::post().uri("/api/v1/houses"), &admin)
            .set_json(json!({
                "projectName": "Mill",
                "engineerId": engineer_id,
                "architectId": architect_id
            }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let house: Value = test::read_body_json(created).await;
    let house_id = house["id"].as_i64().expect("house id");
    assert_eq!(house["engineer"], engineer_id);

    let profile: Value = test::call_and_read_body_json(
        &app,
        authed(
            test::TestRequest::get().uri(&format!("/api/v1/engineers/{engineer_id}")),
            &admin,
        )
        .to_request(),
    )
    .await;
    assert_eq!(profile["houses"][0]["id"], house_id);

    let blocked = test::call_service(
        &app,
        authed(
            test::TestRequest::delete().uri(&format!("/api/v1/engineers/{engineer_id}")),
            &admin,
        )
        .to_request(),
    )
    .await;
    assert_eq!(blocked.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(blocked).await;
    assert_eq!(body["code"], "still_referenced");

    let replaced = test::call_service(
        &app,
        authed(test::TestRequest::put().uri("/api/v1/houses"), &admin)
            .set_json(json!({"id": house_id, "projectName": "Mill", "architectId": architect_id}))
            .to_request(),
    )
    .await;
    assert_eq!(replaced.status(), StatusCode::NO_CONTENT);

    let deleted = test::call_service(
        &app,
        authed(
            test::TestRequest::delete().uri(&format!("/api/v1/engineers/{engineer_id}")),
            &admin,
        )
        .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = test::call_service(
        &app,
        authed(
            test::TestRequest::get().uri(&format!("/api/v1/engineers/{engineer_id}")),
            &admin,
        )
        .to_request(),
    )
    .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    let house: Value = test::call_and_read_body_json(
        &app,
        authed(
            test::TestRequest::get().uri(&format!("/api/v1/houses/{house_id}")),
            &admin,
        )
        .to_request(),
    )
    .await;
    assert_eq!(house["engineer"], Value::Null);
    assert_eq!(house["architect"], architect_id);
}

#[actix_web::test]
async fn a_missing_link_stores_nothing() {
    let app = test::init_service(app()).await;
    let admin = token_for(&app, "root", "ADMIN").await;

    let rejected = test::call_service(
        &app,
        authed(test::TestRequest::post().uri("/api/v1/houses"), &admin)
            .set_json(json!({"projectName": "Mill", "engineerId": 404}))
            .to_request(),
    )
    .await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(rejected).await;
    assert_eq!(body["details"]["field"], "engineerId");

    let houses: Value = test::call_and_read_body_json(
        &app,
        authed(test::TestRequest::get().uri("/api/v1/houses/all"), &admin).to_request(),
    )
    .await;
    assert_eq!(houses, json!([]));
}

#[actix_web::test]
async fn find_matches_exact_names_only() {
    let app = test::init_service(app()).await;
    let admin = token_for(&app, "root", "ADMIN").await;
    for name in ["Mill", "Mill house"] {
        let response = test::call_service(
            &app,
            authed(test::TestRequest::post().uri("/api/v1/houses"), &admin)
                .set_json(json!({"projectName": name}))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let found: Vec<Value> = test::call_and_read_body_json(
        &app,
        authed(test::TestRequest::get().uri("/api/v1/houses/find?name=Mill"), &admin)
            .to_request(),
    )
    .await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["projectName"], "Mill");

    let none: Vec<Value> = test::call_and_read_body_json(
        &app,
        authed(test::TestRequest::get().uri("/api/v1/engineers/find"), &admin).to_request(),
    )
    .await;
    assert!(none.is_empty());
}

#[actix_web::test]
async fn replacing_a_missing_house_is_not_found() {
    let app = test::init_service(app()).await;
    let admin = token_for(&app, "root", "ADMIN").await;

    let response = test::call_service(
        &app,
        authed(test::TestRequest::put().uri("/api/v1/houses"), &admin)
            .set_json(json!({"id": 77, "projectName": "Ghost"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case(json!({"login": "ada", "password": ""}))]
#[case(json!({"login": "ghost", "password": ""}))]
#[case(json!({"login": " ", "password": "pass123456"}))]
#[case(json!({"login": "ghost", "password": "pass123456"}))]
#[actix_web::test]
async fn every_bad_login_is_unauthorized(#[case] credentials: Value) {
    let app = test::init_service(app()).await;
    let _ = token_for(&app, "ada", "USER").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(credentials)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["message"], "invalid credentials");
}

#[actix_web::test]
async fn replacing_twice_with_the_same_draft_is_idempotent() {
    let app = test::init_service(app()).await;
    let admin = token_for(&app, "root", "ADMIN").await;
    let engineer: Value = test::call_and_read_body_json(
        &app,
        authed(test::TestRequest::post().uri("/api/v1/engineers"), &admin)
            .set_json(json!({"name": "John Marston"}))
            .to_request(),
    )
    .await;
    let engineer_id = engineer["id"].as_i64().expect("engineer id");
    let house_id = create_house(&app, &admin, json!({"projectName": "Mill"})).await;
    let draft = json!({"id": house_id, "projectName": "Mill 2", "engineerId": engineer_id});

    let mut states = Vec::new();
    for _ in 0..2 {
        let response = test::call_service(
            &app,
            authed(test::TestRequest::put().uri("/api/v1/houses"), &admin)
                .set_json(draft.clone())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        states.push(stored_house(&app, &admin, house_id).await);
    }

    assert_eq!(states[0], states[1]);
    assert_eq!(
        states[1],
        json!({
            "id": house_id,
            "projectName": "Mill 2",
            "engineer": engineer_id,
            "architect": null
        })
    );
}

#[rstest]
#[case(json!({"engineerId": 404}), "engineerId")]
#[case(json!({"architectId": 404}), "architectId")]
#[actix_web::test]
async fn a_replace_with_a_missing_link_leaves_the_house_unchanged(
    #[case] link: Value,
    #[case] field: &str,
) {
    let app = test::init_service(app()).await;
    let admin = token_for(&app, "root", "ADMIN").await;
    let architect: Value = test::call_and_read_body_json(
        &app,
        authed(test::TestRequest::post().uri("/api/v1/architects"), &admin)
            .set_json(json!({"name": "Sadie Adler"}))
            .to_request(),
    )
    .await;
    let architect_id = architect["id"].as_i64().expect("architect id");
    let house_id = create_house(
        &app,
        &admin,
        json!({"projectName": "Mill", "architectId": architect_id}),
    )
    .await;
    let before = stored_house(&app, &admin, house_id).await;

    let mut draft = json!({"id": house_id, "projectName": "Renamed"});
    if let (Some(body), Some(extra)) = (draft.as_object_mut(), link.as_object()) {
        body.extend(extra.clone());
    }
    let rejected = test::call_service(
        &app,
        authed(test::TestRequest::put().uri("/api/v1/houses"), &admin)
            .set_json(draft)
            .to_request(),
    )
    .await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(rejected).await;
    assert_eq!(body["details"]["field"], field);

    assert_eq!(stored_house(&app, &admin, house_id).await, before);
    assert_eq!(before["projectName"], "Mill");
    assert_eq!(before["architect"], architect_id);
}

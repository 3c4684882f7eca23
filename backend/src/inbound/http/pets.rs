//! Pets API handlers.
//!
//! ```text
//! GET    /api/pets
//! POST   /api/pets            {"name":"Rex","specie":"dog","birthDate":"2021-03-04"}
//! POST   /api/pets/withimage  multipart: name, specie, birthDate, image
//! GET    /api/pets/{pid}
//! PUT    /api/pets/{pid}      {"name":"Rexy"}
//! DELETE /api/pets/{pid}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::domain::{ApiResult, Error, NewPet, PetChanges, PetId};
use crate::inbound::http::envelope;
use crate::inbound::http::multipart::read_multipart;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse, PetResponse, PetsResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, PET_ID, incomplete_pet, invalid_date, parse_id,
};

const BIRTH_DATE: FieldName = FieldName::new("birthDate");

/// Body for `POST /api/pets`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    #[schema(example = "Rex")]
    pub name: Option<String>,
    #[schema(example = "dog")]
    pub specie: Option<String>,
    #[schema(example = "2021-03-04")]
    pub birth_date: Option<String>,
}

/// Partial body for `PUT /api/pets/{pid}`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePetRequest {
    pub name: Option<String>,
    pub specie: Option<String>,
    pub birth_date: Option<String>,
    pub image: Option<String>,
}

/// Accept `YYYY-MM-DD` or an RFC 3339 timestamp, keeping only its date.
fn parse_birth_date(raw: &str) -> Result<NaiveDate, Error> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|ts| ts.date_naive()))
        .map_err(|_| invalid_date(BIRTH_DATE, raw))
}

fn optional_birth_date(raw: Option<&str>) -> Result<Option<NaiveDate>, Error> {
    raw.filter(|value| !value.trim().is_empty())
        .map(parse_birth_date)
        .transpose()
}

fn draft(name: Option<String>, specie: Option<String>, birth_date: Option<&str>) -> ApiResult<NewPet> {
    let birth_date = optional_birth_date(birth_date)?;
    NewPet::try_from_parts(name, specie, birth_date).map_err(|err| incomplete_pet(&err))
}

/// List every pet.
#[utoipa::path(
    get,
    path = "/api/pets",
    responses(
        (status = 200, description = "Pets", body = PetsResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["pets"],
    operation_id = "listPets"
)]
#[get("/pets")]
pub async fn list_pets(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let pets = state.pets.list_pets().await?;
    Ok(envelope::payload(pets))
}

/// Create an unadopted pet without an image.
#[utoipa::path(
    post,
    path = "/api/pets",
    request_body = CreatePetRequest,
    responses(
        (status = 200, description = "Pet created", body = PetResponse),
        (status = 400, description = "Incomplete values", body = ErrorSchema)
    ),
    tags = ["pets"],
    operation_id = "createPet"
)]
#[post("/pets")]
pub async fn create_pet(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePetRequest>,
) -> ApiResult<HttpResponse> {
    let CreatePetRequest {
        name,
        specie,
        birth_date,
    } = payload.into_inner();
    let new_pet = draft(name, specie, birth_date.as_deref())?;
    let pet = state.pets_command.create_pet(new_pet, None).await?;
    Ok(envelope::payload(pet))
}

/// Create a pet from a multipart form carrying its image.
#[utoipa::path(
    post,
    path = "/api/pets/withimage",
    request_body(content_type = "multipart/form-data", description = "name, specie, birthDate and an image file"),
    responses(
        (status = 200, description = "Pet created", body = PetResponse),
        (status = 400, description = "Incomplete values", body = ErrorSchema)
    ),
    tags = ["pets"],
    operation_id = "createPetWithImage"
)]
#[post("/pets/withimage")]
pub async fn create_pet_with_image(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let mut form = read_multipart(&req, body).await?;
    let text = |name: &str| form.field(name).map(str::to_owned);
    let new_pet = draft(text("name"), text("specie"), form.field("birthDate"))?;
    let image = form.take_file("image");
    let pet = state.pets_command.create_pet(new_pet, image).await?;
    Ok(envelope::payload(pet))
}

/// Fetch one pet.
#[utoipa::path(
    get,
    path = "/api/pets/{pid}",
    params(("pid" = String, Path, description = "Pet id")),
    responses(
        (status = 200, description = "Pet", body = PetResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Pet not found", body = ErrorSchema)
    ),
    tags = ["pets"],
    operation_id = "getPet"
)]
#[get("/pets/{pid}")]
pub async fn get_pet(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: PetId = parse_id(&path, PET_ID)?;
    let pet = state.pets.get_pet(&id).await?;
    Ok(envelope::payload(pet))
}

/// Edit descriptive fields; ownership is untouched.
#[utoipa::path(
    put,
    path = "/api/pets/{pid}",
    params(("pid" = String, Path, description = "Pet id")),
    request_body = UpdatePetRequest,
    responses(
        (status = 200, description = "pet updated", body = MessageResponse),
        (status = 400, description = "Invalid body", body = ErrorSchema),
        (status = 404, description = "Pet not found", body = ErrorSchema)
    ),
    tags = ["pets"],
    operation_id = "updatePet"
)]
#[put("/pets/{pid}")]
pub async fn update_pet(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdatePetRequest>,
) -> ApiResult<HttpResponse> {
    let id: PetId = parse_id(&path, PET_ID)?;
    let UpdatePetRequest {
        name,
        specie,
        birth_date,
        image,
    } = payload.into_inner();
    let changes = PetChanges {
        name,
        specie,
        birth_date: optional_birth_date(birth_date.as_deref())?,
        image,
    };
    state.pets_command.update_pet(&id, changes).await?;
    Ok(envelope::message("pet updated"))
}

/// Delete a pet and detach it from its owner.
#[utoipa::path(
    delete,
    path = "/api/pets/{pid}",
    params(("pid" = String, Path, description = "Pet id")),
    responses(
        (status = 200, description = "pet deleted", body = MessageResponse),
        (status = 404, description = "Pet not found", body = ErrorSchema)
    ),
    tags = ["pets"],
    operation_id = "deletePet"
)]
#[delete("/pets/{pid}")]
pub async fn delete_pet(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: PetId = parse_id(&path, PET_ID)?;
    state.pets_command.delete_pet(&id).await?;
    Ok(envelope::message("pet deleted"))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::http::header::CONTENT_TYPE;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::PetRepository;
    use crate::inbound::http::multipart::tests::{Part, content_type, encode};
    use crate::inbound::http::routes::configure_api;
    use crate::inbound::http::test_utils::in_memory_backend;

    macro_rules! app {
        ($backend:expr) => {
            actix_test::init_service(
                App::new()
                    .app_data(web::Data::new($backend.state.clone()))
                    .configure(configure_api),
            )
            .await
        };
    }

    #[rstest]
    #[case("2021-03-04", NaiveDate::from_ymd_opt(2021, 3, 4))]
    #[case("2021-03-04T10:00:00Z", NaiveDate::from_ymd_opt(2021, 3, 4))]
    #[case(" 2020-02-29 ", NaiveDate::from_ymd_opt(2020, 2, 29))]
    fn birth_dates_accept_dates_and_timestamps(
        #[case] raw: &str,
        #[case] expected: Option<NaiveDate>,
    ) {
        assert_eq!(parse_birth_date(raw).ok(), expected);
    }

    #[rstest]
    #[case("yesterday")]
    #[case("2021-02-30")]
    fn malformed_birth_dates_are_rejected(#[case] raw: &str) {
        let error = parse_birth_date(raw).expect_err("invalid date");
        assert_eq!(error.message(), "birthDate must be a date");
    }

    #[actix_web::test]
    async fn creates_unadopted_pet() {
        let backend = in_memory_backend();
        let app = app!(backend);

        let req = actix_test::TestRequest::post()
            .uri("/api/pets")
            .set_json(json!({ "name": "Rex", "specie": "dog", "birthDate": "2021-03-04" }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        let pet = &body["payload"];
        assert_eq!(pet["name"], "Rex");
        assert_eq!(pet["birthDate"], "2021-03-04");
        assert_eq!(pet["adopted"], false);
        assert_eq!(pet["image"], "");
        assert!(pet["owner"].is_null());
    }

    #[rstest]
    #[case(json!({ "specie": "dog", "birthDate": "2021-03-04" }), "name")]
    #[case(json!({ "name": "Rex", "birthDate": "2021-03-04" }), "specie")]
    #[case(json!({ "name": "Rex", "specie": "dog" }), "birthDate")]
    #[actix_web::test]
    async fn incomplete_pets_are_rejected(#[case] body: Value, #[case] missing: &'static str) {
        let backend = in_memory_backend();
        let app = app!(backend);

        let req = actix_test::TestRequest::post()
            .uri("/api/pets")
            .set_json(body)
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["error"], "Incomplete values");
        assert_eq!(body["details"]["fields"][0], missing);
    }

    #[actix_web::test]
    async fn creates_pet_with_stored_image() {
        let backend = in_memory_backend();
        let app = app!(backend);

        let body = encode(&[
            Part::Text("name", "Tom"),
            Part::Text("specie", "cat"),
            Part::Text("birthDate", "2019-07-01"),
            Part::File("image", "tom.png", b"png"),
        ]);
        let req = actix_test::TestRequest::post()
            .uri("/api/pets/withimage")
            .insert_header((CONTENT_TYPE, content_type()))
            .set_payload(body)
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        let image = body["payload"]["image"].as_str().expect("image path");
        assert!(image.contains("pets"));
        assert!(image.ends_with("-tom.png"));
    }

    #[actix_web::test]
    async fn update_keeps_adoption_fields_and_delete_removes() {
        let backend = in_memory_backend();
        let app = app!(backend);

        let req = actix_test::TestRequest::post()
            .uri("/api/pets")
            .set_json(json!({ "name": "Rex", "specie": "dog", "birthDate": "2021-03-04" }))
            .to_request();
        let created: Value = actix_test::read_body_json(actix_test::call_service(&app, req).await).await;
        let id = created["payload"]["_id"].as_str().expect("pet id").to_owned();
        let uri = format!("/api/pets/{id}");

        let req = actix_test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({ "name": "Rexy", "adopted": true }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], "pet updated");

        let pet_id: PetId = id.parse().expect("valid id");
        let stored = PetRepository::find_by_id(&*backend.store, &pet_id)
            .await
            .expect("lookup")
            .expect("pet exists");
        assert_eq!(stored.name, "Rexy");
        assert!(!stored.is_adopted());

        let res = actix_test::call_service(&app, actix_test::TestRequest::delete().uri(&uri).to_request())
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["error"], "Pet not found");
    }

    #[actix_web::test]
    async fn malformed_pet_id_is_bad_request() {
        let backend = in_memory_backend();
        let app = app!(backend);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete().uri("/api/pets/rex").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}

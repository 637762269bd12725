//! Staging project API integration tests
//!
//! Multipart creation and uploads, the area/hotspot/info/item graph
//! operations over HTTP, owner isolation, and the public and admin reads.

#![cfg(feature = "server")]

mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{authorization, bearer, image_part, spawn_app, TestApp};

fn project_form(name: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("projectName", name)
        .add_text("streetAddress", "1 Main St")
        .add_text("cityLocality", "Springfield")
        .add_text("state", "IL")
        .add_text("country", "US")
}

impl TestApp {
    /// Create a project and return its `{ project, areas }` view
    async fn create_project(&self, token: &str, form: MultipartForm) -> Value {
        let body = assert_status!(
            self.server
                .post("/api/straging")
                .add_header(authorization(), bearer(token))
                .multipart(form)
                .await,
            StatusCode::CREATED
        );
        body["data"].clone()
    }

    async fn project_with_cover(&self, token: &str) -> (String, String) {
        let view = self
            .create_project(token, project_form("Loft").add_part("images", image_part("cover.png")))
            .await;
        (
            view["project"]["_id"].as_str().unwrap().to_string(),
            view["areas"][0]["areaId"].as_str().unwrap().to_string(),
        )
    }

    async fn own_project(&self, token: &str, id: &str) -> Value {
        let body = assert_status!(
            self.server
                .get(&format!("/api/straging/user/{}", id))
                .add_header(authorization(), bearer(token))
                .await,
            StatusCode::OK
        );
        body["data"].clone()
    }

    async fn add_hotspot(&self, token: &str, id: &str, area_id: &str, title: &str) -> Value {
        let form = MultipartForm::new()
            .add_text("title", title)
            .add_text("x", "12.5")
            .add_text("y", "40")
            .add_part("image", image_part("hotspot.png"));
        let body = assert_status!(
            self.server
                .post(&format!("/api/straging/{}/areas/{}/hotspots", id, area_id))
                .add_header(authorization(), bearer(token))
                .multipart(form)
                .await,
            StatusCode::OK
        );
        body
    }
}

#[tokio::test]
async fn test_create_with_image_creates_first_area() {
    let app = spawn_app();
    let session = app.register("ana@example.com").await;

    let view = app
        .create_project(
            &session.access_token,
            project_form("Loft").add_part("images", image_part("cover.png")),
        )
        .await;

    let project = &view["project"];
    assert_eq!(project["projectName"], "Loft");
    assert_eq!(project["type"], "capture");
    assert_eq!(project["createdBy"], session.user_id);
    let url = project["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/"));

    let areas = view["areas"].as_array().unwrap();
    assert_eq!(areas.len(), 1);
    assert_eq!(areas[0]["areaName"], "Loft");
    assert_eq!(areas[0]["imageUrl"], url);
    assert_eq!(areas[0]["imageType"], "png");

    let response = app.server.get(url).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_without_image_or_fields() {
    let app = spawn_app();
    let session = app.register("ana@example.com").await;

    let view = app.create_project(&session.access_token, project_form("Barn")).await;
    assert!(view["areas"].as_array().unwrap().is_empty());
    assert!(view["project"].get("url").is_none());

    let body = assert_status!(
        app.server
            .post("/api/straging")
            .add_header(authorization(), bearer(&session.access_token))
            .multipart(MultipartForm::new().add_text("projectName", "Barn"))
            .await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(body["message"], "Missing required fields");
}

#[tokio::test]
async fn test_non_image_upload_rejected() {
    let app = spawn_app();
    let session = app.register("ana@example.com").await;

    let notes = Part::bytes(b"plain text".to_vec())
        .file_name("notes.txt")
        .mime_type("text/plain");
    let body = assert_status!(
        app.server
            .post("/api/straging")
            .add_header(authorization(), bearer(&session.access_token))
            .multipart(project_form("Loft").add_part("images", notes))
            .await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(body["message"], "Only image files are allowed");

    let body = assert_status!(
        app.server
            .get("/api/straging/user")
            .add_header(authorization(), bearer(&session.access_token))
            .await,
        StatusCode::OK
    );
    assert_eq!(body["data"]["pagination"]["totalCount"], 0);
}

#[tokio::test]
async fn test_second_area_moves_project_image_down() {
    let app = spawn_app();
    let session = app.register("ana@example.com").await;
    let (id, _) = app.project_with_cover(&session.access_token).await;

    let body = assert_status!(
        app.server
            .post(&format!("/api/straging/{}/areas", id))
            .add_header(authorization(), bearer(&session.access_token))
            .multipart(
                MultipartForm::new()
                    .add_text("areaName", "Bath")
                    .add_part("image", image_part("bath.png")),
            )
            .await,
        StatusCode::OK
    );
    assert_eq!(body["message"], "Area added successfully");
    assert_eq!(body["data"]["areaName"], "Bath");
    assert!(body["data"]["id"].is_string());

    let view = app.own_project(&session.access_token, &id).await;
    assert!(view["project"].get("url").is_none());
    let areas = view["areas"].as_array().unwrap();
    assert_eq!(areas.len(), 2);
    assert!(areas.iter().all(|area| area["imageUrl"].is_string()));
}

#[tokio::test]
async fn test_first_area_image_lifts_to_project() {
    let app = spawn_app();
    let session = app.register("ana@example.com").await;
    let view = app.create_project(&session.access_token, project_form("Barn")).await;
    let id = view["project"]["_id"].as_str().unwrap();

    let body = assert_status!(
        app.server
            .post(&format!("/api/straging/{}/areas", id))
            .add_header(authorization(), bearer(&session.access_token))
            .multipart(
                MultipartForm::new()
                    .add_text("areaName", "Hall")
                    .add_part("image", image_part("hall.png")),
            )
            .await,
        StatusCode::OK
    );
    assert!(body["data"].get("imageUrl").is_none());

    let view = app.own_project(&session.access_token, id).await;
    assert!(view["project"]["url"].is_string());
    assert_eq!(view["project"]["mimeType"], "image/png");
}

#[tokio::test]
async fn test_add_area_validation() {
    let app = spawn_app();
    let session = app.register("ana@example.com").await;
    let (id, _) = app.project_with_cover(&session.access_token).await;

    let body = assert_status!(
        app.server
            .post(&format!("/api/straging/{}/areas", id))
            .add_header(authorization(), bearer(&session.access_token))
            .multipart(MultipartForm::new().add_part("image", image_part("x.png")))
            .await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(body["message"], "Area name is required");

    let body = assert_status!(
        app.server
            .post(&format!("/api/straging/{}/areas", id))
            .add_header(authorization(), bearer(&session.access_token))
            .multipart(MultipartForm::new().add_text("areaName", "Bath"))
            .await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(body["message"], "Image is required for area");
}

#[tokio::test]
async fn test_hotspot_add_then_update() {
    let app = spawn_app();
    let session = app.register("ana@example.com").await;
    let token = &session.access_token;
    let (id, root) = app.project_with_cover(token).await;

    let body = app.add_hotspot(token, &id, &root, "Kitchen").await;
    assert_eq!(body["message"], "Hotspot added successfully");
    let hotspot = &body["data"]["hotspot"];
    let area = &body["data"]["area"];
    assert_eq!(hotspot["title"], "Kitchen");
    assert_eq!(hotspot["x"], 12.5);
    assert_eq!(hotspot["childAreaId"], area["areaId"]);
    assert_eq!(area["parentHotspotId"], hotspot["hotspotId"]);

    let again = app.add_hotspot(token, &id, &root, " kitchen").await;
    assert_eq!(again["message"], "Hotspot updated successfully");
    assert_eq!(again["data"]["hotspot"]["hotspotId"], hotspot["hotspotId"]);

    let view = app.own_project(token, &id).await;
    let areas = view["areas"].as_array().unwrap();
    assert_eq!(areas.len(), 2);
    assert_eq!(areas[0]["hotspots"].as_array().unwrap().len(), 1);
    assert!(view["project"].get("url").is_none());
}

#[tokio::test]
async fn test_hotspot_validation() {
    let app = spawn_app();
    let session = app.register("ana@example.com").await;
    let token = &session.access_token;
    let (id, root) = app.project_with_cover(token).await;

    let body = assert_status!(
        app.server
            .post(&format!("/api/straging/{}/areas/{}/hotspots", id, root))
            .add_header(authorization(), bearer(token))
            .multipart(
                MultipartForm::new()
                    .add_text("x", "1")
                    .add_part("image", image_part("k.png")),
            )
            .await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(body["message"], "x, y and title are required");

    let body = assert_status!(
        app.server
            .post(&format!("/api/straging/{}/areas/area_0_missing/hotspots", id))
            .add_header(authorization(), bearer(token))
            .multipart(
                MultipartForm::new()
                    .add_text("title", "Kitchen")
                    .add_text("x", "1")
                    .add_text("y", "1")
                    .add_part("image", image_part("k.png")),
            )
            .await,
        StatusCode::NOT_FOUND
    );
    assert_eq!(body["message"], "Parent area not found");
}

#[tokio::test]
async fn test_info_upserts_by_coordinate() {
    let app = spawn_app();
    let session = app.register("ana@example.com").await;
    let token = &session.access_token;
    let (id, root) = app.project_with_cover(token).await;
    let path = format!("/api/straging/{}/areas/{}/info", id, root);

    let body = assert_status!(
        app.server
            .post(&path)
            .add_header(authorization(), bearer(token))
            .json(&json!({ "description": "Oak floor", "x": 10, "y": "20" }))
            .await,
        StatusCode::OK
    );
    assert_eq!(body["message"], "Info added successfully");
    let info_id = body["data"]["id"].clone();

    let body = assert_status!(
        app.server
            .post(&path)
            .add_header(authorization(), bearer(token))
            .json(&json!({ "description": "Walnut floor", "x": "10", "y": 20 }))
            .await,
        StatusCode::OK
    );
    assert_eq!(body["message"], "Info updated successfully");
    assert_eq!(body["data"]["id"], info_id);

    let body = assert_status!(
        app.server
            .get(&format!("/api/straging/{}/areas", id))
            .add_header(authorization(), bearer(token))
            .await,
        StatusCode::OK
    );
    let info = body["data"][0]["info"].as_array().unwrap();
    assert_eq!(info.len(), 1);
    assert_eq!(info[0]["description"], "Walnut floor");

    let body = assert_status!(
        app.server
            .post(&path)
            .add_header(authorization(), bearer(token))
            .json(&json!({ "description": "  " }))
            .await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(body["message"], "Description is required");
}

#[tokio::test]
async fn test_item_library_lifecycle() {
    let app = spawn_app();
    let session = app.register("ana@example.com").await;
    let token = &session.access_token;
    let (id, root) = app.project_with_cover(token).await;

    let body = assert_status!(
        app.server
            .post(&format!("/api/straging/{}/items", id))
            .add_header(authorization(), bearer(token))
            .multipart(
                MultipartForm::new()
                    .add_text("width", "50")
                    .add_text("areaId", root.as_str())
                    .add_text("x", "5")
                    .add_part("image", image_part("sofa.png")),
            )
            .await,
        StatusCode::OK
    );
    assert_eq!(body["message"], "Item added to library successfully");
    let item_id = body["data"]["item"]["itemId"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["item"]["width"], 50.0);
    assert_eq!(body["data"]["item"]["height"], 100.0);
    assert_eq!(body["data"]["areaItem"]["x"], 5.0);

    let body = assert_status!(
        app.server
            .post(&format!("/api/straging/{}/areas/{}/items", id, root))
            .add_header(authorization(), bearer(token))
            .json(&json!({ "itemId": item_id, "x": "7", "y": 8, "rotation": 90 }))
            .await,
        StatusCode::OK
    );
    assert_eq!(body["message"], "Item added to area successfully");
    let instance_id = body["data"]["instanceId"].as_str().unwrap().to_string();

    let body = assert_status!(
        app.server
            .put(&format!("/api/straging/{}/areas/{}/items/{}", id, root, instance_id))
            .add_header(authorization(), bearer(token))
            .json(&json!({ "x": 42, "flipX": true }))
            .await,
        StatusCode::OK
    );
    assert_eq!(body["data"]["x"], 42.0);
    assert_eq!(body["data"]["y"], 8.0);
    assert_eq!(body["data"]["flipX"], true);

    let body = assert_status!(
        app.server
            .delete(&format!("/api/straging/{}/items/{}", id, item_id))
            .add_header(authorization(), bearer(token))
            .await,
        StatusCode::OK
    );
    assert_eq!(body["data"]["removedInstances"], 2);

    let view = app.own_project(token, &id).await;
    assert!(view["project"]["items"].as_array().unwrap().is_empty());
    assert!(view["areas"][0]["items"].as_array().unwrap().is_empty());

    let body = assert_status!(
        app.server
            .delete(&format!("/api/straging/{}/areas/{}/items/{}", id, root, instance_id))
            .add_header(authorization(), bearer(token))
            .await,
        StatusCode::NOT_FOUND
    );
    assert_eq!(body["message"], "Item instance not found");
}

#[tokio::test]
async fn test_place_unknown_item() {
    let app = spawn_app();
    let session = app.register("ana@example.com").await;
    let token = &session.access_token;
    let (id, root) = app.project_with_cover(token).await;

    let body = assert_status!(
        app.server
            .post(&format!("/api/straging/{}/areas/{}/items", id, root))
            .add_header(authorization(), bearer(token))
            .json(&json!({}))
            .await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(body["message"], "itemId is required");

    let body = assert_status!(
        app.server
            .post(&format!("/api/straging/{}/areas/{}/items", id, root))
            .add_header(authorization(), bearer(token))
            .json(&json!({ "itemId": "item_0_missing" }))
            .await,
        StatusCode::NOT_FOUND
    );
    assert_eq!(body["message"], "Item not found in library");
}

#[tokio::test]
async fn test_pair_delete_restores_single_area_shape() {
    let app = spawn_app();
    let session = app.register("ana@example.com").await;
    let token = &session.access_token;
    let (id, root) = app.project_with_cover(token).await;
    let body = app.add_hotspot(token, &id, &root, "Kitchen").await;
    let hotspot_id = body["data"]["hotspot"]["hotspotId"].as_str().unwrap().to_string();

    let path = format!("/api/straging/{}/delete-area-hotspot", id);
    let body = assert_status!(
        app.server
            .delete(&path)
            .add_header(authorization(), bearer(token))
            .json(&json!({ "hotspotId": hotspot_id }))
            .await,
        StatusCode::OK
    );
    assert_eq!(body["data"]["deletedHotspots"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["deletedAreas"][0]["areaName"], "Kitchen");

    let view = app.own_project(token, &id).await;
    let areas = view["areas"].as_array().unwrap();
    assert_eq!(areas.len(), 1);
    assert!(areas[0].get("imageUrl").is_none());
    assert!(view["project"]["url"].is_string());

    let body = assert_status!(
        app.server
            .delete(&path)
            .add_header(authorization(), bearer(token))
            .json(&json!({ "hotspotId": hotspot_id }))
            .await,
        StatusCode::NOT_FOUND
    );
    assert_eq!(body["message"], "Area or hotspot not found");

    let body = assert_status!(
        app.server
            .delete(&path)
            .add_header(authorization(), bearer(token))
            .json(&json!({}))
            .await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(body["message"], "Either areaId or hotspotId is required");
}

#[tokio::test]
async fn test_delete_area_leaves_hotspot() {
    let app = spawn_app();
    let session = app.register("ana@example.com").await;
    let token = &session.access_token;
    let (id, root) = app.project_with_cover(token).await;
    let body = app.add_hotspot(token, &id, &root, "Kitchen").await;
    let kitchen = body["data"]["area"]["areaId"].as_str().unwrap().to_string();

    let body = assert_status!(
        app.server
            .delete(&format!("/api/straging/{}/areas/{}", id, kitchen))
            .add_header(authorization(), bearer(token))
            .await,
        StatusCode::OK
    );
    assert_eq!(body["data"]["areaName"], "Kitchen");

    let view = app.own_project(token, &id).await;
    assert_eq!(view["areas"].as_array().unwrap().len(), 1);
    assert_eq!(view["areas"][0]["hotspots"].as_array().unwrap().len(), 1);

    let response = app
        .server
        .delete(&format!("/api/straging/{}/areas/{}", id, kitchen))
        .add_header(authorization(), bearer(token))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_and_delete_project() {
    let app = spawn_app();
    let session = app.register("ana@example.com").await;
    let token = &session.access_token;
    let (id, _) = app.project_with_cover(token).await;

    let body = assert_status!(
        app.server
            .put(&format!("/api/straging/{}", id))
            .add_header(authorization(), bearer(token))
            .json(&json!({ "projectName": "Attic", "note": "north facing" }))
            .await,
        StatusCode::OK
    );
    assert_eq!(body["data"]["project"]["projectName"], "Attic");
    assert_eq!(body["data"]["project"]["note"], "north facing");

    let response = app
        .server
        .put(&format!("/api/straging/{}", id))
        .add_header(authorization(), bearer(token))
        .json(&json!({ "country": " " }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body = assert_status!(
        app.server
            .delete(&format!("/api/straging/{}", id))
            .add_header(authorization(), bearer(token))
            .await,
        StatusCode::OK
    );
    assert_eq!(body["data"]["projectName"], "Attic");

    let body = assert_status!(
        app.server
            .get(&format!("/api/straging/user/{}", id))
            .add_header(authorization(), bearer(token))
            .await,
        StatusCode::NOT_FOUND
    );
    assert_eq!(body["message"], "Staging project not found");

    let body = assert_status!(
        app.server
            .get("/api/straging/user/not-a-uuid")
            .add_header(authorization(), bearer(token))
            .await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(body["message"], "Invalid project ID");
}

#[tokio::test]
async fn test_other_users_cannot_see_or_modify() {
    let app = spawn_app();
    let owner = app.register("ana@example.com").await;
    let other = app.register("bo@example.com").await;
    let (id, root) = app.project_with_cover(&owner.access_token).await;

    let response = app
        .server
        .get(&format!("/api/straging/user/{}", id))
        .add_header(authorization(), bearer(&other.access_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = app
        .server
        .post(&format!("/api/straging/{}/areas/{}/info", id, root))
        .add_header(authorization(), bearer(&other.access_token))
        .json(&json!({ "description": "mine now" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = app
        .server
        .delete(&format!("/api/straging/{}", id))
        .add_header(authorization(), bearer(&other.access_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let body = assert_status!(
        app.server
            .get("/api/straging/user")
            .add_header(authorization(), bearer(&other.access_token))
            .await,
        StatusCode::OK
    );
    assert!(body["data"]["projects"].as_array().unwrap().is_empty());

    let response = app.server.get("/api/straging/user").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_unknown_library_item_succeeds() {
    let app = spawn_app();
    let session = app.register("ana@example.com").await;
    let (id, _) = app.project_with_cover(&session.access_token).await;

    let body = assert_status!(
        app.server
            .delete(&format!("/api/straging/{}/items/item_0_missing", id))
            .add_header(authorization(), bearer(&session.access_token))
            .await,
        StatusCode::OK
    );
    assert_eq!(body["status"], 1);
    assert_eq!(body["data"]["item"], Value::Null);
    assert_eq!(body["data"]["removedInstances"], 0);
}

#[tokio::test]
async fn test_both_prefixes_serve_projects() {
    let app = spawn_app();
    let session = app.register("ana@example.com").await;
    let (id, _) = app.project_with_cover(&session.access_token).await;

    let body = assert_status!(
        app.server
            .get(&format!("/api/staging/user/{}", id))
            .add_header(authorization(), bearer(&session.access_token))
            .await,
        StatusCode::OK
    );
    assert_eq!(body["data"]["project"]["_id"], id);

    assert_status!(
        app.server
            .post("/api/staging")
            .add_header(authorization(), bearer(&session.access_token))
            .multipart(project_form("Barn"))
            .await,
        StatusCode::CREATED
    );

    let body = assert_status!(app.server.get("/api/straging/public").await, StatusCode::OK);
    assert_eq!(body["data"]["projects"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_public_reads_hide_owner() {
    let app = spawn_app();
    let session = app.register("ana@example.com").await;
    let (id, _) = app.project_with_cover(&session.access_token).await;

    let body = assert_status!(
        app.server.get(&format!("/api/straging/public/{}", id)).await,
        StatusCode::OK
    );
    assert_eq!(body["data"]["project"]["_id"], id);
    assert!(body["data"]["project"].get("createdBy").is_none());
    assert_eq!(body["data"]["areas"].as_array().unwrap().len(), 1);

    let body = assert_status!(
        app.server
            .get("/api/straging/public")
            .add_query_param("search", "LOF")
            .await,
        StatusCode::OK
    );
    let projects = body["data"]["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert!(projects[0]["project"].get("createdBy").is_none());
}

#[tokio::test]
async fn test_admin_project_management() {
    let app = spawn_app();
    let ana = app.register("ana@example.com").await;
    let bo = app.register("bo@example.com").await;
    let (first, _) = app.project_with_cover(&ana.access_token).await;
    let (second, _) = app.project_with_cover(&bo.access_token).await;
    let admin_token = app.create_admin("root@example.com").await;

    let response = app
        .server
        .get("/api/straging/admin/all")
        .add_header(authorization(), bearer(&ana.access_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let body = assert_status!(
        app.server
            .get("/api/straging/admin/all")
            .add_header(authorization(), bearer(&admin_token))
            .await,
        StatusCode::OK
    );
    assert_eq!(body["data"]["pagination"]["totalCount"], 2);
    assert!(body["data"]["projects"][0]["project"]["createdBy"].is_string());

    let body = assert_status!(
        app.server
            .get(&format!("/api/straging/admin/{}", first))
            .add_header(authorization(), bearer(&admin_token))
            .await,
        StatusCode::OK
    );
    assert_eq!(body["data"]["project"]["createdBy"], ana.user_id);

    for ids in [json!([]), json!(["nope"])] {
        let body = assert_status!(
            app.server
                .delete("/api/straging/admin/bulk")
                .add_header(authorization(), bearer(&admin_token))
                .json(&json!({ "ids": ids }))
                .await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(body["message"], "Invalid IDs provided");
    }

    let body = assert_status!(
        app.server
            .delete("/api/straging/admin/bulk")
            .add_header(authorization(), bearer(&admin_token))
            .json(&json!({ "ids": [first, second] }))
            .await,
        StatusCode::OK
    );
    assert_eq!(body["data"]["deletedCount"], 2);

    let response = app
        .server
        .delete(&format!("/api/straging/admin/{}", first))
        .add_header(authorization(), bearer(&admin_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

//! HTTP-level integration tests for the catalog resources:
//! materiales, bodegas, obras (with obrero assignments), obreros,
//! and herramientas descriptive CRUD.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, post_auth, post_json_auth, put_auth, put_json_auth,
    seed_user_with_token,
};
use sqlx::PgPool;

/// Seed an admin and return their token.
async fn admin_token(pool: &PgPool) -> String {
    let (_admin, token) = seed_user_with_token(pool, "root", "admin").await;
    token
}

/// Create a material via the API and return its id.
async fn create_material(pool: &PgPool, token: &str, nombre: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "nombre": nombre, "unidad": "saco", "precio_unitario": 8500, "stock_minimo": 10
    });
    let response = post_json_auth(app, "/api/v1/materiales", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Materiales
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_material_returns_201(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "nombre": "Cemento", "unidad": "saco", "precio_unitario": 8500
    });
    let response = post_json_auth(app, "/api/v1/materiales", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["nombre"], "Cemento");
    assert_eq!(json["unidad"], "saco");
    assert_eq!(json["precio_unitario"], 8500);
    // stock_minimo defaults to 0 when omitted.
    assert_eq!(json["stock_minimo"], 0);
    assert_eq!(json["is_active"], true);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_material_invalid_unidad_is_400(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "nombre": "Agua", "unidad": "galon", "precio_unitario": 100
    });
    let response = post_json_auth(app, "/api/v1/materiales", body, &token).await;
    // Unknown enum variant fails JSON deserialization.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_material_nonpositive_price_is_400(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "nombre": "Gratis", "unidad": "unidad", "precio_unitario": 0
    });
    let response = post_json_auth(app, "/api/v1/materiales", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_material_price_and_threshold(pool: PgPool) {
    let token = admin_token(&pool).await;
    let id = create_material(&pool, &token, "Fierro").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "precio_unitario": 9200, "stock_minimo": 25 });
    let response = put_json_auth(app, &format!("/api/v1/materiales/{id}"), body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["precio_unitario"], 9200);
    assert_eq!(json["stock_minimo"], 25);
    // Identity fields are immutable.
    assert_eq!(json["nombre"], "Fierro");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_material_is_soft(pool: PgPool) {
    let token = admin_token(&pool).await;
    let id = create_material(&pool, &token, "Descontinuado").await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/materiales/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Still readable, but flagged inactive.
    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/materiales/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["is_active"], false);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_get_nonexistent_material_returns_404(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/materiales/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Bodegas
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_central_bodega(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "nombre": "Bodega Central", "kind": "central" });
    let response = post_json_auth(app, "/api/v1/bodegas", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["kind"], "central");
    assert!(json["obra_id"].is_null());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_obra_bodega_requires_obra_id(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    // kind=obra without obra_id breaks the schema CHECK.
    let body = serde_json::json!({ "nombre": "Bodega Faena", "kind": "obra" });
    let response = post_json_auth(app, "/api/v1/bodegas", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_obra_bodega_linked_to_obra(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "direccion": "Av. Las Torres 1200" });
    let response = post_json_auth(app, "/api/v1/obras", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let obra_id = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "nombre": "Bodega Torres", "kind": "obra", "obra_id": obra_id
    });
    let response = post_json_auth(app, "/api/v1/bodegas", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["obra_id"], obra_id);
}

// ---------------------------------------------------------------------------
// Obras and obrero assignments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_obra_starts_abierta_and_can_close(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "direccion": "Calle Falsa 123" });
    let response = post_json_auth(app, "/api/v1/obras", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["estado"], "abierta");
    let id = json["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_auth(app, &format!("/api/v1/obras/{id}/cerrar"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["estado"], "cerrada");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_obra_obrero_assignment_lifecycle(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/obras",
        serde_json::json!({ "direccion": "Obra Norte" }),
        &token,
    )
    .await;
    let obra_id = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/obreros",
        serde_json::json!({ "nombre_completo": "Juan Soto" }),
        &token,
    )
    .await;
    let obrero_id = body_json(response).await["id"].as_i64().unwrap();

    // Assign; re-assign is a no-op.
    for _ in 0..2 {
        let app = common::build_test_app(pool.clone());
        let response = put_auth(
            app,
            &format!("/api/v1/obras/{obra_id}/obreros/{obrero_id}"),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/obras/{obra_id}/obreros"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["nombre_completo"], "Juan Soto");

    // Unassign.
    let app = common::build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/v1/obras/{obra_id}/obreros/{obrero_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/obras/{obra_id}/obreros"), &token).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Actividades per obra
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_actividad_create_and_list_under_obra(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/obras",
        serde_json::json!({ "direccion": "Obra Sur" }),
        &token,
    )
    .await;
    let obra_id = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "nombre": "Excavacion de fundaciones",
        "tipo": "movimiento de tierra",
        "descripcion": "Zanjas perimetrales segun plano",
        "horas_estimadas": 40
    });
    let response = post_json_auth(
        app,
        &format!("/api/v1/obras/{obra_id}/actividades"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["obra_id"], obra_id);
    assert_eq!(json["nombre"], "Excavacion de fundaciones");
    // New actividades always start pendiente.
    assert_eq!(json["estado"], "pendiente");
    assert_eq!(json["horas_estimadas"], 40);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/obras/{obra_id}/actividades"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["nombre"], "Excavacion de fundaciones");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_actividad_under_unknown_obra_is_404(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/obras/9999/actividades", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/obras/9999/actividades",
        serde_json::json!({ "nombre": "Fantasma" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_actividad_zero_hours_is_400(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/obras",
        serde_json::json!({ "direccion": "Obra Este" }),
        &token,
    )
    .await;
    let obra_id = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/obras/{obra_id}/actividades"),
        serde_json::json!({ "nombre": "Moldaje", "horas_estimadas": 0 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Herramientas descriptive CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_new_herramienta_starts_disponible(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "nombre": "Taladro", "marca": "Bosch" });
    let response = post_json_auth(app, "/api/v1/herramientas", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["estado"], "disponible");
    assert_eq!(json["marca"], "Bosch");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_herramienta_update_cannot_touch_estado(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/herramientas",
        serde_json::json!({ "nombre": "Esmeril" }),
        &token,
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    // `estado` in the update body is ignored by the DTO.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "nombre": "Esmeril Angular", "estado": "en_uso" });
    let response = put_json_auth(app, &format!("/api/v1/herramientas/{id}"), body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["nombre"], "Esmeril Angular");
    assert_eq!(json["estado"], "disponible");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_mantenimiento_round_trip(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/herramientas",
        serde_json::json!({ "nombre": "Soldadora" }),
        &token,
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/api/v1/herramientas/{id}/mantenimiento"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["estado"], "mantenimiento");

    let app = common::build_test_app(pool);
    let response = post_auth(
        app,
        &format!("/api/v1/herramientas/{id}/disponible"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["estado"], "disponible");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_baja_is_terminal(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/herramientas",
        serde_json::json!({ "nombre": "Carretilla Vieja" }),
        &token,
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/herramientas/{id}/baja"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["estado"], "baja");

    // No transition leaves `baja`.
    let app = common::build_test_app(pool);
    let response = post_auth(
        app,
        &format!("/api/v1/herramientas/{id}/mantenimiento"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

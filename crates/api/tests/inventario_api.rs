//! HTTP-level integration tests for the inventory ledger:
//! movement recording, shape validation, stock levels, and the
//! below-minimum report.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, seed_user_with_token};
use sqlx::PgPool;

/// Seed the fixtures every ledger test needs: a bodeguero with a token,
/// a material (Cemento, stock_minimo 10), and two central bodegas.
///
/// Returns `(token, material_id, bodega_a, bodega_b)`.
async fn seed_ledger(pool: &PgPool) -> (String, i64, i64, i64) {
    let (_admin, admin) = seed_user_with_token(pool, "root", "admin").await;
    let (_bod, token) = seed_user_with_token(pool, "bodeguero1", "bodeguero").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/materiales",
        serde_json::json!({
            "nombre": "Cemento", "unidad": "saco", "precio_unitario": 8500, "stock_minimo": 10
        }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let material_id = body_json(response).await["id"].as_i64().unwrap();

    let mut bodegas = Vec::new();
    for nombre in ["Bodega A", "Bodega B"] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            "/api/v1/bodegas",
            serde_json::json!({ "nombre": nombre, "kind": "central" }),
            &admin,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        bodegas.push(body_json(response).await["id"].as_i64().unwrap());
    }

    (token, material_id, bodegas[0], bodegas[1])
}

/// Record a movement and return the response.
async fn record(
    pool: &PgPool,
    token: &str,
    body: serde_json::Value,
) -> axum::http::Response<axum::body::Body> {
    let app = common::build_test_app(pool.clone());
    post_json_auth(app, "/api/v1/inventario/movimientos", body, token).await
}

/// Fetch the stock level for one (bodega, material) pair.
async fn level(pool: &PgPool, token: &str, bodega: i64, material: i64) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/inventario/niveles/{bodega}/{material}"),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// The canonical Cemento scenario
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_entrada_transferencia_salida_flow(pool: PgPool) {
    let (token, material, bodega_a, bodega_b) = seed_ledger(&pool).await;

    // Entrada: 50 sacos into A.
    let response = record(
        &pool,
        &token,
        serde_json::json!({
            "kind": "entrada", "material_id": material,
            "bodega_destino_id": bodega_a, "cantidad": 50
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["kind"], "entrada");
    assert_eq!(json["cantidad"], 50);

    assert_eq!(level(&pool, &token, bodega_a, material).await["cantidad"], 50);

    // Transferencia: 20 sacos A -> B.
    let response = record(
        &pool,
        &token,
        serde_json::json!({
            "kind": "transferencia", "material_id": material,
            "bodega_origen_id": bodega_a, "bodega_destino_id": bodega_b, "cantidad": 20
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(level(&pool, &token, bodega_a, material).await["cantidad"], 30);
    assert_eq!(level(&pool, &token, bodega_b, material).await["cantidad"], 20);

    // Salida of 25 from B: only 20 available, must fail and change nothing.
    let response = record(
        &pool,
        &token,
        serde_json::json!({
            "kind": "salida", "material_id": material,
            "bodega_origen_id": bodega_b, "cantidad": 25
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INSUFFICIENT_STOCK");
    assert_eq!(level(&pool, &token, bodega_b, material).await["cantidad"], 20);

    // Salida of 20 from B drains the line to exactly zero.
    let response = record(
        &pool,
        &token,
        serde_json::json!({
            "kind": "salida", "material_id": material,
            "bodega_origen_id": bodega_b, "cantidad": 20
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(level(&pool, &token, bodega_b, material).await["cantidad"], 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_ajuste_signed_delta(pool: PgPool) {
    let (token, material, bodega_a, _bodega_b) = seed_ledger(&pool).await;

    record(
        &pool,
        &token,
        serde_json::json!({
            "kind": "entrada", "material_id": material,
            "bodega_destino_id": bodega_a, "cantidad": 40
        }),
    )
    .await;

    // Negative ajuste subtracts; the stored movement has cantidad > 0 with
    // the bodega on the origen side.
    let response = record(
        &pool,
        &token,
        serde_json::json!({
            "kind": "ajuste", "material_id": material,
            "bodega_origen_id": bodega_a, "cantidad": -5,
            "nota": "conteo físico"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["cantidad"], 5);
    assert_eq!(json["bodega_origen_id"], bodega_a);
    assert!(json["bodega_destino_id"].is_null());

    assert_eq!(level(&pool, &token, bodega_a, material).await["cantidad"], 35);

    // Positive ajuste adds.
    let response = record(
        &pool,
        &token,
        serde_json::json!({
            "kind": "ajuste", "material_id": material,
            "bodega_origen_id": bodega_a, "cantidad": 3
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(level(&pool, &token, bodega_a, material).await["cantidad"], 38);

    // An ajuste below the available quantity is still insufficient stock.
    let response = record(
        &pool,
        &token,
        serde_json::json!({
            "kind": "ajuste", "material_id": material,
            "bodega_origen_id": bodega_a, "cantidad": -100
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_devolucion_adds_to_destino(pool: PgPool) {
    let (token, material, bodega_a, _bodega_b) = seed_ledger(&pool).await;

    let response = record(
        &pool,
        &token,
        serde_json::json!({
            "kind": "devolucion", "material_id": material,
            "bodega_destino_id": bodega_a, "cantidad": 7,
            "nota": "sobrante de faena"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(level(&pool, &token, bodega_a, material).await["cantidad"], 7);
}

// ---------------------------------------------------------------------------
// Shape validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_invalid_shapes_are_400(pool: PgPool) {
    let (token, material, bodega_a, bodega_b) = seed_ledger(&pool).await;

    let bad_shapes = [
        // Entrada with an origen.
        serde_json::json!({
            "kind": "entrada", "material_id": material,
            "bodega_origen_id": bodega_a, "bodega_destino_id": bodega_b, "cantidad": 5
        }),
        // Salida with no origen.
        serde_json::json!({
            "kind": "salida", "material_id": material,
            "bodega_destino_id": bodega_a, "cantidad": 5
        }),
        // Transferencia to the same bodega.
        serde_json::json!({
            "kind": "transferencia", "material_id": material,
            "bodega_origen_id": bodega_a, "bodega_destino_id": bodega_a, "cantidad": 5
        }),
        // Ajuste with both bodegas.
        serde_json::json!({
            "kind": "ajuste", "material_id": material,
            "bodega_origen_id": bodega_a, "bodega_destino_id": bodega_b, "cantidad": 5
        }),
        // Ajuste with zero delta.
        serde_json::json!({
            "kind": "ajuste", "material_id": material,
            "bodega_origen_id": bodega_a, "cantidad": 0
        }),
        // Entrada with non-positive cantidad.
        serde_json::json!({
            "kind": "entrada", "material_id": material,
            "bodega_destino_id": bodega_a, "cantidad": -10
        }),
    ];

    for body in bad_shapes {
        let response = record(&pool, &token, body.clone()).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "shape should be rejected: {body}"
        );
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_unknown_material_is_404(pool: PgPool) {
    let (token, _material, bodega_a, _bodega_b) = seed_ledger(&pool).await;

    let response = record(
        &pool,
        &token,
        serde_json::json!({
            "kind": "entrada", "material_id": 999999,
            "bodega_destino_id": bodega_a, "cantidad": 5
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Levels, history, and below-minimum
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_level_for_untouched_pair_is_zero(pool: PgPool) {
    let (token, material, bodega_a, _bodega_b) = seed_ledger(&pool).await;
    let json = level(&pool, &token, bodega_a, material).await;
    assert_eq!(json["cantidad"], 0);
    // 0 < stock_minimo of 10.
    assert_eq!(json["bajo_minimo"], true);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_below_minimum_flips_with_stock(pool: PgPool) {
    let (token, material, bodega_a, _bodega_b) = seed_ledger(&pool).await;

    record(
        &pool,
        &token,
        serde_json::json!({
            "kind": "entrada", "material_id": material,
            "bodega_destino_id": bodega_a, "cantidad": 12
        }),
    )
    .await;
    assert_eq!(
        level(&pool, &token, bodega_a, material).await["bajo_minimo"],
        false
    );

    record(
        &pool,
        &token,
        serde_json::json!({
            "kind": "salida", "material_id": material,
            "bodega_origen_id": bodega_a, "cantidad": 4
        }),
    )
    .await;
    // 8 < 10.
    assert_eq!(
        level(&pool, &token, bodega_a, material).await["bajo_minimo"],
        true
    );

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/inventario/bajo-minimo", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let lines = json.as_array().unwrap();
    assert!(lines
        .iter()
        .any(|l| l["bodega_id"] == bodega_a && l["material_id"] == material));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_movement_history_filters_and_order(pool: PgPool) {
    let (token, material, bodega_a, bodega_b) = seed_ledger(&pool).await;

    record(
        &pool,
        &token,
        serde_json::json!({
            "kind": "entrada", "material_id": material,
            "bodega_destino_id": bodega_a, "cantidad": 30
        }),
    )
    .await;
    record(
        &pool,
        &token,
        serde_json::json!({
            "kind": "transferencia", "material_id": material,
            "bodega_origen_id": bodega_a, "bodega_destino_id": bodega_b, "cantidad": 10
        }),
    )
    .await;

    // Unfiltered: newest first.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/inventario/movimientos", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let movements = json.as_array().unwrap();
    assert_eq!(movements.len(), 2);
    assert_eq!(movements[0]["kind"], "transferencia");
    assert_eq!(movements[1]["kind"], "entrada");

    // bodega filter matches either side of a transferencia.
    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/inventario/movimientos?bodega_id={bodega_b}"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    let movements = json.as_array().unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0]["kind"], "transferencia");
}

// ---------------------------------------------------------------------------
// RBAC on the ledger
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_supervisor_reads_but_cannot_record(pool: PgPool) {
    let (_token, material, bodega_a, _bodega_b) = seed_ledger(&pool).await;
    let (_sup, sup_token) = seed_user_with_token(&pool, "super1", "supervisor").await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/inventario/movimientos", &sup_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = record(
        &pool,
        &sup_token,
        serde_json::json!({
            "kind": "entrada", "material_id": material,
            "bodega_destino_id": bodega_a, "cantidad": 5
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

//! Repository-level tests for the stock-level and active-loan queries.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use andamio_core::custody::ReturnCondition;
use andamio_core::inventory::{BodegaKind, MovementKind, UnidadMedida};
use andamio_core::roles::ROLE_BODEGUERO;
use andamio_core::types::DbId;
use andamio_db::models::bodega::CreateBodega;
use andamio_db::models::herramienta::CreateHerramienta;
use andamio_db::models::inventario::RecordMovement;
use andamio_db::models::material::CreateMaterial;
use andamio_db::models::obra::CreateObra;
use andamio_db::models::obrero::CreateObrero;
use andamio_db::models::prestamo::{CreatePrestamo, ReturnPrestamo};
use andamio_db::models::usuario::CreateUsuario;
use andamio_db::repositories::{
    BodegaRepo, HerramientaRepo, InventoryRepo, MaterialRepo, ObraRepo, ObreroRepo, PrestamoRepo,
    UsuarioRepo,
};

async fn seed_usuario(pool: &PgPool) -> DbId {
    let usuario = UsuarioRepo::create(
        pool,
        &CreateUsuario {
            username: "bodeguero1".into(),
            email: "bodeguero1@example.com".into(),
            password_hash: "$argon2id$fake-hash-for-tests".into(),
            role: ROLE_BODEGUERO.into(),
        },
    )
    .await
    .unwrap();
    usuario.id
}

async fn seed_material(pool: &PgPool, stock_minimo: i64) -> DbId {
    let material = MaterialRepo::create(
        pool,
        &CreateMaterial {
            nombre: "Cemento 25kg".into(),
            unidad: UnidadMedida::Saco,
            precio_unitario: 5990,
            stock_minimo: Some(stock_minimo),
        },
    )
    .await
    .unwrap();
    material.id
}

async fn seed_bodega(pool: &PgPool) -> DbId {
    let bodega = BodegaRepo::create(
        pool,
        &CreateBodega {
            nombre: "Bodega Central".into(),
            kind: BodegaKind::Central,
            obra_id: None,
        },
    )
    .await
    .unwrap();
    bodega.id
}

async fn record_entrada(
    pool: &PgPool,
    usuario_id: DbId,
    material_id: DbId,
    bodega_id: DbId,
    cantidad: i64,
) {
    InventoryRepo::record_movement(
        pool,
        &RecordMovement {
            kind: MovementKind::Entrada,
            material_id,
            bodega_origen_id: None,
            bodega_destino_id: Some(bodega_id),
            cantidad,
            obra_id: None,
            nota: None,
        },
        usuario_id,
    )
    .await
    .unwrap();
}

#[sqlx::test(migrations = "../../migrations")]
async fn query_level_is_zero_without_inventory_line(pool: PgPool) {
    let material_id = seed_material(&pool, 0).await;
    let bodega_id = seed_bodega(&pool).await;

    let level = InventoryRepo::query_level(&pool, bodega_id, material_id)
        .await
        .unwrap();
    assert_eq!(level, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn query_level_tracks_recorded_movements(pool: PgPool) {
    let usuario_id = seed_usuario(&pool).await;
    let material_id = seed_material(&pool, 0).await;
    let bodega_id = seed_bodega(&pool).await;

    record_entrada(&pool, usuario_id, material_id, bodega_id, 40).await;
    record_entrada(&pool, usuario_id, material_id, bodega_id, 10).await;

    let level = InventoryRepo::query_level(&pool, bodega_id, material_id)
        .await
        .unwrap();
    assert_eq!(level, 50);
}

#[sqlx::test(migrations = "../../migrations")]
async fn is_below_minimum_follows_the_threshold(pool: PgPool) {
    let usuario_id = seed_usuario(&pool).await;
    let material_id = seed_material(&pool, 20).await;
    let bodega_id = seed_bodega(&pool).await;

    // No line yet: level 0 is below a minimum of 20.
    assert!(InventoryRepo::is_below_minimum(&pool, bodega_id, material_id)
        .await
        .unwrap());

    record_entrada(&pool, usuario_id, material_id, bodega_id, 25).await;
    assert!(!InventoryRepo::is_below_minimum(&pool, bodega_id, material_id)
        .await
        .unwrap());
}

#[sqlx::test(migrations = "../../migrations")]
async fn find_active_for_tool_sees_only_open_loans(pool: PgPool) {
    let usuario_id = seed_usuario(&pool).await;
    let bodega_id = seed_bodega(&pool).await;
    let herramienta = HerramientaRepo::create(
        &pool,
        &CreateHerramienta {
            nombre: "Taladro percutor".into(),
            marca: Some("Bosch".into()),
        },
    )
    .await
    .unwrap();
    let obrero = ObreroRepo::create(
        &pool,
        &CreateObrero {
            nombre_completo: "Pedro Soto".into(),
        },
    )
    .await
    .unwrap();
    let obra = ObraRepo::create(
        &pool,
        &CreateObra {
            direccion: "Av. Las Torres 1200".into(),
            obrero_id: None,
        },
    )
    .await
    .unwrap();

    assert!(PrestamoRepo::find_active_for_tool(&pool, herramienta.id)
        .await
        .unwrap()
        .is_none());

    let prestamo = PrestamoRepo::create_loan(
        &pool,
        &CreatePrestamo {
            herramienta_id: herramienta.id,
            obrero_id: obrero.id,
            bodega_id,
            obra_id: obra.id,
            fecha_devolucion_estimada: (Utc::now() + Duration::days(7)).date_naive(),
            nota: None,
        },
        usuario_id,
    )
    .await
    .unwrap();

    let active = PrestamoRepo::find_active_for_tool(&pool, herramienta.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(active.id, prestamo.id);
    assert_eq!(active.estado, "activo");

    PrestamoRepo::return_loan(
        &pool,
        prestamo.id,
        &ReturnPrestamo {
            condicion: ReturnCondition::Normal,
            nota: None,
        },
    )
    .await
    .unwrap();

    assert!(PrestamoRepo::find_active_for_tool(&pool, herramienta.id)
        .await
        .unwrap()
        .is_none());
}

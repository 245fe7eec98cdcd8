//! Inventory CRUD. Every kind shares the same five routes and handlers;
//! [`Resource`] maps them onto the matching `RigService` methods.

use std::future::Future;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rig_core::entities::{
    Brand, Credential, CredentialType, Equipment, EquipmentType, Library, Location, Network,
    NewCredential, NewEquipment, NewEquipmentType, NewLocation, NewNetwork, Scope,
};
use rig_db::error::DatabaseError;
use rig_db::service::RigService;
use rig_db::updates::{
    BrandUpdate, CredentialTypeUpdate, CredentialUpdate, EquipmentTypeUpdate, EquipmentUpdate,
    LibraryUpdate, LocationUpdate, NetworkUpdate, ScopeUpdate,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiJson, ApiQuery, RequireIdentity};
use crate::context::SharedContext;

type DbResult<T> = Result<T, DatabaseError>;

/// Optional list filters. Only credentials honour `equipment_id`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub equipment_id: Option<String>,
}

/// One inventory table exposed under `/inventory/<PATH>`.
pub trait Resource: Send + Sync + 'static {
    const PATH: &'static str;

    type Entity: Serialize + Send;
    type Create: DeserializeOwned + Send;
    type Update: DeserializeOwned + Send + Sync;

    fn list(svc: &RigService, query: &ListQuery)
    -> impl Future<Output = DbResult<Vec<Self::Entity>>> + Send;
    fn create(svc: &RigService, input: Self::Create)
    -> impl Future<Output = DbResult<Self::Entity>> + Send;
    fn get(svc: &RigService, id: &str) -> impl Future<Output = DbResult<Self::Entity>> + Send;
    fn update(
        svc: &RigService,
        id: &str,
        update: &Self::Update,
    ) -> impl Future<Output = DbResult<Self::Entity>> + Send;
    fn delete(svc: &RigService, id: &str) -> impl Future<Output = DbResult<()>> + Send;
}

pub fn routes() -> Router<SharedContext> {
    Router::new()
        .merge(resource_routes::<Brands>())
        .merge(resource_routes::<EquipmentTypes>())
        .merge(resource_routes::<Libraries>())
        .merge(resource_routes::<Locations>())
        .merge(resource_routes::<Scopes>())
        .merge(resource_routes::<Networks>())
        .merge(resource_routes::<CredentialTypes>())
        .merge(resource_routes::<EquipmentItems>())
        .merge(resource_routes::<Credentials>())
}

fn resource_routes<R: Resource>() -> Router<SharedContext> {
    Router::new()
        .route(
            &format!("/inventory/{}", R::PATH),
            get(list::<R>).post(create::<R>),
        )
        .route(
            &format!("/inventory/{}/:id", R::PATH),
            get(fetch::<R>).patch(update::<R>).delete(remove::<R>),
        )
}

async fn list<R: Resource>(
    State(ctx): State<SharedContext>,
    _caller: RequireIdentity,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<Vec<R::Entity>>, ApiError> {
    Ok(Json(R::list(&ctx.service, &query).await?))
}

async fn create<R: Resource>(
    State(ctx): State<SharedContext>,
    RequireIdentity(caller): RequireIdentity,
    ApiJson(input): ApiJson<R::Create>,
) -> Result<(StatusCode, Json<R::Entity>), ApiError> {
    let created = R::create(&ctx.service, input).await?;
    tracing::info!(kind = R::PATH, by = %caller.subject, "inventory record created");
    Ok((StatusCode::CREATED, Json(created)))
}

async fn fetch<R: Resource>(
    State(ctx): State<SharedContext>,
    _caller: RequireIdentity,
    Path(id): Path<String>,
) -> Result<Json<R::Entity>, ApiError> {
    Ok(Json(R::get(&ctx.service, &id).await?))
}

async fn update<R: Resource>(
    State(ctx): State<SharedContext>,
    RequireIdentity(caller): RequireIdentity,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<R::Update>,
) -> Result<Json<R::Entity>, ApiError> {
    let updated = R::update(&ctx.service, &id, &patch).await?;
    tracing::info!(kind = R::PATH, %id, by = %caller.subject, "inventory record updated");
    Ok(Json(updated))
}

async fn remove<R: Resource>(
    State(ctx): State<SharedContext>,
    RequireIdentity(caller): RequireIdentity,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    R::delete(&ctx.service, &id).await?;
    tracing::info!(kind = R::PATH, %id, by = %caller.subject, "inventory record deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NameBody {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryBody {
    pub name: String,
    #[serde(default)]
    pub to_be_used: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScopeBody {
    pub description: String,
}

pub struct Brands;

impl Resource for Brands {
    const PATH: &'static str = "brands";
    type Entity = Brand;
    type Create = NameBody;
    type Update = BrandUpdate;

    async fn list(svc: &RigService, _query: &ListQuery) -> DbResult<Vec<Brand>> {
        svc.list_brands().await
    }
    async fn create(svc: &RigService, input: NameBody) -> DbResult<Brand> {
        svc.create_brand(&input.name).await
    }
    async fn get(svc: &RigService, id: &str) -> DbResult<Brand> {
        svc.get_brand(id).await
    }
    async fn update(svc: &RigService, id: &str, update: &BrandUpdate) -> DbResult<Brand> {
        svc.update_brand(id, update).await
    }
    async fn delete(svc: &RigService, id: &str) -> DbResult<()> {
        svc.delete_brand(id).await
    }
}

pub struct EquipmentTypes;

impl Resource for EquipmentTypes {
    const PATH: &'static str = "equipment-types";
    type Entity = EquipmentType;
    type Create = NewEquipmentType;
    type Update = EquipmentTypeUpdate;

    async fn list(svc: &RigService, _query: &ListQuery) -> DbResult<Vec<EquipmentType>> {
        svc.list_equipment_types().await
    }
    async fn create(svc: &RigService, input: NewEquipmentType) -> DbResult<EquipmentType> {
        svc.create_equipment_type(&input).await
    }
    async fn get(svc: &RigService, id: &str) -> DbResult<EquipmentType> {
        svc.get_equipment_type(id).await
    }
    async fn update(
        svc: &RigService,
        id: &str,
        update: &EquipmentTypeUpdate,
    ) -> DbResult<EquipmentType> {
        svc.update_equipment_type(id, update).await
    }
    async fn delete(svc: &RigService, id: &str) -> DbResult<()> {
        svc.delete_equipment_type(id).await
    }
}

pub struct Libraries;

impl Resource for Libraries {
    const PATH: &'static str = "libraries";
    type Entity = Library;
    type Create = LibraryBody;
    type Update = LibraryUpdate;

    async fn list(svc: &RigService, _query: &ListQuery) -> DbResult<Vec<Library>> {
        svc.list_libraries().await
    }
    async fn create(svc: &RigService, input: LibraryBody) -> DbResult<Library> {
        svc.create_library(&input.name, input.to_be_used).await
    }
    async fn get(svc: &RigService, id: &str) -> DbResult<Library> {
        svc.get_library(id).await
    }
    async fn update(svc: &RigService, id: &str, update: &LibraryUpdate) -> DbResult<Library> {
        svc.update_library(id, update).await
    }
    async fn delete(svc: &RigService, id: &str) -> DbResult<()> {
        svc.delete_library(id).await
    }
}

pub struct Locations;

impl Resource for Locations {
    const PATH: &'static str = "locations";
    type Entity = Location;
    type Create = NewLocation;
    type Update = LocationUpdate;

    async fn list(svc: &RigService, _query: &ListQuery) -> DbResult<Vec<Location>> {
        svc.list_locations().await
    }
    async fn create(svc: &RigService, input: NewLocation) -> DbResult<Location> {
        svc.create_location(&input).await
    }
    async fn get(svc: &RigService, id: &str) -> DbResult<Location> {
        svc.get_location(id).await
    }
    async fn update(svc: &RigService, id: &str, update: &LocationUpdate) -> DbResult<Location> {
        svc.update_location(id, update).await
    }
    async fn delete(svc: &RigService, id: &str) -> DbResult<()> {
        svc.delete_location(id).await
    }
}

pub struct Scopes;

impl Resource for Scopes {
    const PATH: &'static str = "scopes";
    type Entity = Scope;
    type Create = ScopeBody;
    type Update = ScopeUpdate;

    async fn list(svc: &RigService, _query: &ListQuery) -> DbResult<Vec<Scope>> {
        svc.list_scopes().await
    }
    async fn create(svc: &RigService, input: ScopeBody) -> DbResult<Scope> {
        svc.create_scope(&input.description).await
    }
    async fn get(svc: &RigService, id: &str) -> DbResult<Scope> {
        svc.get_scope(id).await
    }
    async fn update(svc: &RigService, id: &str, update: &ScopeUpdate) -> DbResult<Scope> {
        svc.update_scope(id, update).await
    }
    async fn delete(svc: &RigService, id: &str) -> DbResult<()> {
        svc.delete_scope(id).await
    }
}

pub struct Networks;

impl Resource for Networks {
    const PATH: &'static str = "networks";
    type Entity = Network;
    type Create = NewNetwork;
    type Update = NetworkUpdate;

    async fn list(svc: &RigService, _query: &ListQuery) -> DbResult<Vec<Network>> {
        svc.list_networks().await
    }
    async fn create(svc: &RigService, input: NewNetwork) -> DbResult<Network> {
        svc.create_network(&input).await
    }
    async fn get(svc: &RigService, id: &str) -> DbResult<Network> {
        svc.get_network(id).await
    }
    async fn update(svc: &RigService, id: &str, update: &NetworkUpdate) -> DbResult<Network> {
        svc.update_network(id, update).await
    }
    async fn delete(svc: &RigService, id: &str) -> DbResult<()> {
        svc.delete_network(id).await
    }
}

pub struct CredentialTypes;

impl Resource for CredentialTypes {
    const PATH: &'static str = "credential-types";
    type Entity = CredentialType;
    type Create = NameBody;
    type Update = CredentialTypeUpdate;

    async fn list(svc: &RigService, _query: &ListQuery) -> DbResult<Vec<CredentialType>> {
        svc.list_credential_types().await
    }
    async fn create(svc: &RigService, input: NameBody) -> DbResult<CredentialType> {
        svc.create_credential_type(&input.name).await
    }
    async fn get(svc: &RigService, id: &str) -> DbResult<CredentialType> {
        svc.get_credential_type(id).await
    }
    async fn update(
        svc: &RigService,
        id: &str,
        update: &CredentialTypeUpdate,
    ) -> DbResult<CredentialType> {
        svc.update_credential_type(id, update).await
    }
    async fn delete(svc: &RigService, id: &str) -> DbResult<()> {
        svc.delete_credential_type(id).await
    }
}

pub struct EquipmentItems;

impl Resource for EquipmentItems {
    const PATH: &'static str = "equipment";
    type Entity = Equipment;
    type Create = NewEquipment;
    type Update = EquipmentUpdate;

    async fn list(svc: &RigService, _query: &ListQuery) -> DbResult<Vec<Equipment>> {
        svc.list_equipment().await
    }
    async fn create(svc: &RigService, input: NewEquipment) -> DbResult<Equipment> {
        svc.create_equipment(&input).await
    }
    async fn get(svc: &RigService, id: &str) -> DbResult<Equipment> {
        svc.get_equipment(id).await
    }
    async fn update(svc: &RigService, id: &str, update: &EquipmentUpdate) -> DbResult<Equipment> {
        svc.update_equipment(id, update).await
    }
    /// Also removes the equipment's credentials.
    async fn delete(svc: &RigService, id: &str) -> DbResult<()> {
        svc.delete_equipment(id).await
    }
}

pub struct Credentials;

impl Resource for Credentials {
    const PATH: &'static str = "credentials";
    type Entity = Credential;
    type Create = NewCredential;
    type Update = CredentialUpdate;

    async fn list(svc: &RigService, query: &ListQuery) -> DbResult<Vec<Credential>> {
        svc.list_credentials(query.equipment_id.as_deref()).await
    }
    async fn create(svc: &RigService, input: NewCredential) -> DbResult<Credential> {
        svc.create_credential(&input).await
    }
    async fn get(svc: &RigService, id: &str) -> DbResult<Credential> {
        svc.get_credential(id).await
    }
    async fn update(svc: &RigService, id: &str, update: &CredentialUpdate) -> DbResult<Credential> {
        svc.update_credential(id, update).await
    }
    async fn delete(svc: &RigService, id: &str) -> DbResult<()> {
        svc.delete_credential(id).await
    }
}

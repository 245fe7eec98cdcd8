//! Shared test utilities for rig-db tests.

pub(crate) mod helpers {
    use rig_core::entities::{
        CredentialType, Equipment, EquipmentType, Library, Location, Network, NewEquipment,
        NewEquipmentType, NewLocation, NewNetwork, Scope,
    };

    use crate::service::RigService;

    /// In-memory service with migrations applied.
    pub async fn test_service() -> RigService {
        RigService::new_local(":memory:").await.unwrap()
    }

    /// Every row an equipment needs, created fresh.
    pub struct EquipmentDeps {
        pub equipment_type: EquipmentType,
        pub network: Network,
        pub location: Location,
        pub scope: Scope,
        pub library: Library,
    }

    pub async fn equipment_deps(svc: &RigService, ip: &str) -> EquipmentDeps {
        EquipmentDeps {
            equipment_type: svc
                .create_equipment_type(&NewEquipmentType {
                    name: "router".into(),
                    description: None,
                    family: "routing".into(),
                })
                .await
                .unwrap(),
            network: svc
                .create_network(&NewNetwork {
                    in_use: true,
                    description: None,
                    protocol: "ipv4".into(),
                    ip: ip.into(),
                    netmask: Some("255.255.255.0".into()),
                    gateway: None,
                })
                .await
                .unwrap(),
            location: svc
                .create_location(&NewLocation {
                    site: Some("lab-a".into()),
                    rack: Some("R1".into()),
                    ..NewLocation::default()
                })
                .await
                .unwrap(),
            scope: svc.create_scope("regression").await.unwrap(),
            library: svc.create_library("netlib", true).await.unwrap(),
        }
    }

    pub fn new_equipment(name: &str, deps: &EquipmentDeps) -> NewEquipment {
        NewEquipment {
            name: name.into(),
            type_id: deps.equipment_type.id.clone(),
            net_id: deps.network.id.clone(),
            virtual_id: 0,
            location_id: deps.location.id.clone(),
            scope_id: deps.scope.id.clone(),
            lib_id: deps.library.id.clone(),
            brand_id: None,
            owner: None,
            in_use: None,
            description: None,
            note: None,
        }
    }

    pub async fn test_equipment(svc: &RigService, ip: &str) -> Equipment {
        let deps = equipment_deps(svc, ip).await;
        svc.create_equipment(&new_equipment("core-1", &deps))
            .await
            .unwrap()
    }

    pub async fn test_credential_type(svc: &RigService) -> CredentialType {
        svc.create_credential_type("ssh").await.unwrap()
    }
}

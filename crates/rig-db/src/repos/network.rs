//! Network bindings. Each IP is registered once.

use rig_core::entities::{Network, NewNetwork};
use rig_core::ids::PREFIX_NETWORK;
use rig_core::validate::{self, SHORT_TEXT};

use crate::error::DatabaseError;
use crate::helpers::{SetClause, get_opt_string};
use crate::service::RigService;
use crate::updates::NetworkUpdate;

const COLUMNS: &str = "id, in_use, description, protocol, ip, netmask, gateway";

fn row_to_network(row: &libsql::Row) -> Result<Network, DatabaseError> {
    Ok(Network {
        id: row.get::<String>(0)?,
        in_use: row.get::<i64>(1)? != 0,
        description: get_opt_string(row, 2)?,
        protocol: row.get::<String>(3)?,
        ip: row.get::<String>(4)?,
        netmask: get_opt_string(row, 5)?,
        gateway: get_opt_string(row, 6)?,
    })
}

impl RigService {
    pub async fn create_network(&self, input: &NewNetwork) -> Result<Network, DatabaseError> {
        let description =
            validate::optional_text("description", input.description.as_deref(), SHORT_TEXT)?;
        let protocol = validate::required_text("protocol", &input.protocol, SHORT_TEXT)?;
        let ip = validate::ip_address("ip", &input.ip)?;
        let netmask = validate::optional_ip_address("netmask", input.netmask.as_deref())?;
        let gateway = validate::optional_ip_address("gateway", input.gateway.as_deref())?;

        self.ensure_ip_free(&ip, None).await?;

        let id = self.db().generate_id(PREFIX_NETWORK).await?;
        self.db()
            .execute(
                "INSERT INTO networks (id, in_use, description, protocol, ip, netmask, gateway)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    id.as_str(),
                    i64::from(input.in_use),
                    description,
                    protocol,
                    ip,
                    netmask,
                    gateway
                ],
            )
            .await?;
        self.get_network(&id).await
    }

    pub async fn get_network(&self, id: &str) -> Result<Network, DatabaseError> {
        let mut rows = self
            .db()
            .query(&format!("SELECT {COLUMNS} FROM networks WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("network", id))?;
        row_to_network(&row)
    }

    pub async fn list_networks(&self) -> Result<Vec<Network>, DatabaseError> {
        let mut rows = self
            .db()
            .query(&format!("SELECT {COLUMNS} FROM networks ORDER BY ip"), ())
            .await?;
        let mut networks = Vec::new();
        while let Some(row) = rows.next().await? {
            networks.push(row_to_network(&row)?);
        }
        Ok(networks)
    }

    pub async fn update_network(
        &self,
        id: &str,
        update: &NetworkUpdate,
    ) -> Result<Network, DatabaseError> {
        let mut clause = SetClause::new();
        if let Some(in_use) = update.in_use {
            clause.set("in_use", i64::from(in_use));
        }
        if let Some(description) = &update.description {
            clause.set(
                "description",
                validate::optional_text("description", description.as_deref(), SHORT_TEXT)?,
            );
        }
        if let Some(protocol) = &update.protocol {
            clause.set(
                "protocol",
                validate::required_text("protocol", protocol, SHORT_TEXT)?,
            );
        }
        if let Some(ip) = &update.ip {
            let ip = validate::ip_address("ip", ip)?;
            self.ensure_ip_free(&ip, Some(id)).await?;
            clause.set("ip", ip);
        }
        if let Some(netmask) = &update.netmask {
            clause.set(
                "netmask",
                validate::optional_ip_address("netmask", netmask.as_deref())?,
            );
        }
        if let Some(gateway) = &update.gateway {
            clause.set(
                "gateway",
                validate::optional_ip_address("gateway", gateway.as_deref())?,
            );
        }
        if clause.is_empty() {
            return self.get_network(id).await;
        }
        let (sql, params) = clause.into_update("networks", id);
        if self.db().execute(&sql, params).await? == 0 {
            return Err(DatabaseError::not_found("network", id));
        }
        self.get_network(id).await
    }

    /// Fails with a validation error while an equipment is bound to the network.
    pub async fn delete_network(&self, id: &str) -> Result<(), DatabaseError> {
        self.delete_row("networks", "network", id).await
    }

    async fn ensure_ip_free(&self, ip: &str, except: Option<&str>) -> Result<(), DatabaseError> {
        let mut rows = self
            .db()
            .query(
                "SELECT id FROM networks WHERE ip = ?1 AND id IS NOT ?2",
                libsql::params![ip, except],
            )
            .await?;
        if rows.next().await?.is_some() {
            return Err(DatabaseError::Validation(format!(
                "ip: {ip} is already registered"
            )));
        }
        Ok(())
    }
}

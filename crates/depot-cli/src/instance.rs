//! Instance files.
//!
//! An instance is one TOML (or JSON) document holding the scalars, the three
//! entity tiers and both distance tables:
//!
//! ```toml
//! facilities_to_open = 2
//! rail_unit_cost = 0.046
//! truck_unit_cost = 0.81
//!
//! [[plants]]
//! id = "Waterloo"
//!
//! [[distribution_centers]]
//! id = "DC1"
//! fixed_cost = 16000000.0
//! location = "Hamilton, ON"
//!
//! [[stores]]
//! id = "Store1"
//! demand = 3000000.0
//!
//! [[rail_distances]]
//! plant = "Waterloo"
//! dc = "DC1"
//! km = 70.0
//!
//! [[truck_distances]]
//! dc = "DC1"
//! store = "Store1"
//! km = 50.0
//! ```

use anyhow::{Context, Result};
use depot_core::{
    DcId, DepotResult, DistributionCenter, Plant, PlantId, Store, StoreId, SupplyNetwork,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailDistance {
    pub plant: PlantId,
    pub dc: DcId,
    pub km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckDistance {
    pub dc: DcId,
    pub store: StoreId,
    pub km: f64,
}

/// On-disk form of a [`SupplyNetwork`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceFile {
    pub facilities_to_open: usize,
    pub rail_unit_cost: f64,
    pub truck_unit_cost: f64,
    pub plants: Vec<Plant>,
    pub distribution_centers: Vec<DistributionCenter>,
    pub stores: Vec<Store>,
    #[serde(default)]
    pub rail_distances: Vec<RailDistance>,
    #[serde(default)]
    pub truck_distances: Vec<TruckDistance>,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

impl InstanceFile {
    /// Read an instance, picking JSON or TOML from the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading instance file {}", path.display()))?;
        if is_json(path) {
            serde_json::from_str(&text)
                .with_context(|| format!("parsing JSON instance {}", path.display()))
        } else {
            toml::from_str(&text)
                .with_context(|| format!("parsing TOML instance {}", path.display()))
        }
    }

    /// Write the instance, picking JSON or TOML from the file extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = if is_json(path) {
            serde_json::to_string_pretty(self).context("serializing instance to JSON")?
        } else {
            self.to_toml()?
        };
        fs::write(path, text).with_context(|| format!("writing {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serializing instance to TOML")
    }

    /// Validate into a registry.
    pub fn into_network(self) -> DepotResult<SupplyNetwork> {
        let mut builder = SupplyNetwork::builder()
            .facilities_to_open(self.facilities_to_open)
            .rail_unit_cost(self.rail_unit_cost)
            .truck_unit_cost(self.truck_unit_cost);
        for plant in self.plants {
            builder = builder.add_plant(plant);
        }
        for dc in self.distribution_centers {
            builder = builder.add_distribution_center(dc);
        }
        for store in self.stores {
            builder = builder.add_store(store);
        }
        for lane in self.rail_distances {
            builder = builder.rail_distance(lane.plant, lane.dc, lane.km);
        }
        for lane in self.truck_distances {
            builder = builder.truck_distance(lane.dc, lane.store, lane.km);
        }
        builder.build()
    }

    pub fn from_network(network: &SupplyNetwork) -> Self {
        Self {
            facilities_to_open: network.facilities_to_open(),
            rail_unit_cost: network.rail_unit_cost(),
            truck_unit_cost: network.truck_unit_cost(),
            plants: network.plants().to_vec(),
            distribution_centers: network.distribution_centers().to_vec(),
            stores: network.stores().to_vec(),
            rail_distances: network
                .rail_distances()
                .into_iter()
                .map(|(lane, km)| RailDistance {
                    plant: lane.plant,
                    dc: lane.dc,
                    km: km.value(),
                })
                .collect(),
            truck_distances: network
                .truck_distances()
                .into_iter()
                .map(|(lane, km)| TruckDistance {
                    dc: lane.dc,
                    store: lane.store,
                    km: km.value(),
                })
                .collect(),
        }
    }
}

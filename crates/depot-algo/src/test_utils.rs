//! Reference instance shared by tests, benchmarks and the `depot sample` command.

use depot_core::{DepotResult, DistributionCenter, Plant, Store, SupplyNetwork};

/// Rail cost per km per unit shipped in the reference instance
pub const REFERENCE_RAIL_UNIT_COST: f64 = 0.046;
/// Truck cost per km per unit of demand in the reference instance
pub const REFERENCE_TRUCK_UNIT_COST: f64 = 0.81;

/// (id, fixed cost, location)
pub const REFERENCE_DCS: [(&str, f64, &str); 6] = [
    ("DC1", 16_000_000.0, "Hamilton, ON"),
    ("DC2", 11_000_000.0, "Thunder Bay, ON"),
    ("DC3", 6_000_000.0, "Forestville, QC"),
    ("DC4", 4_500_000.0, "Cumberland House, SK"),
    ("DC5", 7_000_000.0, "Tumbler Ridge, BC"),
    ("DC6", 4_000_000.0, "Indian Cabins, AB"),
];

/// (id, demand, location)
pub const REFERENCE_STORES: [(&str, f64, &str); 10] = [
    ("Store1", 3_000_000.0, "Mississauga, ON"),
    ("Store2", 2_200_000.0, "Calgary, AB"),
    ("Store3", 1_000_000.0, "Winnipeg, MB"),
    ("Store4", 940_000.0, "Quebec City, QC"),
    ("Store5", 600_000.0, "Halifax, NS"),
    ("Store6", 460_000.0, "Kamloops, BC"),
    ("Store7", 13_000.0, "La Ronge, SK"),
    ("Store8", 13_000.0, "Happy Valley-Goose Bay, NL"),
    ("Store9", 7_000.0, "Fort Smith, NT"),
    ("Store10", 1_500.0, "Watson Lake, YT"),
];

/// Sum of `REFERENCE_STORES` demands
pub const REFERENCE_TOTAL_DEMAND: f64 = 8_234_500.0;

/// (id, location, km to DC1..DC6)
pub const REFERENCE_PLANTS: [(&str, &str, [f64; 6]); 2] = [
    ("Waterloo", "Waterloo, ON", [70.0, 1100.0, 1400.0, 1600.0, 2000.0, 2800.0]),
    ("Kingston", "Kingston, ON", [300.0, 750.0, 2000.0, 2200.0, 3400.0, 2600.0]),
];

/// Truck km from each DC (rows) to Store1..Store10 (columns)
pub const REFERENCE_TRUCK_KM: [[f64; 10]; 6] = [
    [50.0, 3200.0, 2000.0, 900.0, 1900.0, 4200.0, 3000.0, 2100.0, 3700.0, 4100.0],
    [1400.0, 2000.0, 700.0, 1800.0, 2800.0, 2600.0, 1800.0, 3100.0, 3300.0, 3600.0],
    [900.0, 3700.0, 2400.0, 600.0, 1200.0, 4500.0, 3000.0, 2200.0, 4100.0, 4900.0],
    [2500.0, 1200.0, 800.0, 2600.0, 3400.0, 1700.0, 500.0, 3500.0, 2200.0, 3000.0],
    [4400.0, 1100.0, 2300.0, 4700.0, 5500.0, 800.0, 2100.0, 5400.0, 2500.0, 3300.0],
    [3400.0, 500.0, 1600.0, 3700.0, 4500.0, 1200.0, 1500.0, 4400.0, 1800.0, 2600.0],
];

/// The 2-plant, 6-DC, 10-store Canadian network, opening `k` DCs.
pub fn reference_network(k: usize) -> DepotResult<SupplyNetwork> {
    let mut builder = SupplyNetwork::builder()
        .rail_unit_cost(REFERENCE_RAIL_UNIT_COST)
        .truck_unit_cost(REFERENCE_TRUCK_UNIT_COST)
        .facilities_to_open(k);

    for (id, location, _) in REFERENCE_PLANTS {
        builder = builder.add_plant(Plant::new(id).with_location(location));
    }
    for (id, fixed_cost, location) in REFERENCE_DCS {
        builder = builder
            .add_distribution_center(DistributionCenter::new(id, fixed_cost).with_location(location));
    }
    for (id, demand, location) in REFERENCE_STORES {
        builder = builder.add_store(Store::new(id, demand).with_location(location));
    }
    for (plant, _, kms) in REFERENCE_PLANTS {
        for ((dc, _, _), km) in REFERENCE_DCS.iter().zip(kms) {
            builder = builder.rail_distance(plant, *dc, km);
        }
    }
    for ((dc, _, _), row) in REFERENCE_DCS.iter().zip(REFERENCE_TRUCK_KM.iter()) {
        builder = builder.truck_distance_row(*dc, row);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::{DcStoreLane, Quantity};

    #[test]
    fn test_reference_network_shape() {
        let net = reference_network(2).unwrap();
        assert_eq!(net.num_plants(), 2);
        assert_eq!(net.num_candidate_dcs(), 6);
        assert_eq!(net.num_stores(), 10);
        assert_eq!(net.facilities_to_open(), 2);
        assert_eq!(net.total_demand(), Quantity(REFERENCE_TOTAL_DEMAND));
        let summed: f64 = REFERENCE_STORES.iter().map(|(_, demand, _)| demand).sum();
        assert_eq!(summed, REFERENCE_TOTAL_DEMAND);
        assert_eq!(net.rail_distances().len(), 12);
        assert_eq!(net.truck_distances().len(), 60);
        assert_eq!(
            net.truck_distance(&DcStoreLane::new("DC4", "Store7")).map(|k| k.value()),
            Some(500.0)
        );
    }
}

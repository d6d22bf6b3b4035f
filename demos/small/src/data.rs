//! Embedded reference tables for a synthetic Amsterdam-like city.
//!
//! Entity ids follow builder order: sites 0–3, suppliers 4–5, hubs 6–9,
//! demolition sites 10–11.

pub const COMPOSITION_CSV: &str = "\
building_type,biobased,category,material,tons
residential,none,foundation,concrete,900
residential,none,structural,concrete,600
residential,none,structural,steel,120
residential,none,non-structural,timber,80
residential,none,non-structural,glass,40
residential,none,non-structural,modules,150
residential,semi,foundation,concrete,900
residential,semi,structural,concrete,600
residential,semi,structural,steel,120
residential,semi,non-structural,timber,160
residential,semi,non-structural,modules,150
office,none,foundation,concrete,1400
office,none,structural,steel,400
office,none,structural,concrete,500
office,none,non-structural,glass,120
office,none,non-structural,timber,60
office,none,non-structural,modules,220
office,semi,foundation,concrete,1400
office,semi,structural,steel,400
office,semi,structural,concrete,500
office,semi,non-structural,timber,200
office,semi,non-structural,modules,220
";

pub const NAME_CONVERSION_CSV: &str = "\
construction_name,demolition_name
concrete,concrete_rubble
steel,steel_scrap
timber,wood
glass,glass_cullet
modules,modules
";

pub const SUPPLIER_TYPES_CSV: &str = "\
material,supplier_type
concrete,national
glass,national
modules,national
steel,international
timber,international
";

pub const VEHICLES_CSV: &str = "\
network,energy,region,emissions_per_ton_km,tare_weight_tons,axles,capacity_concrete,capacity_steel,capacity_timber,capacity_glass,capacity_modules
road,diesel,urban,0.000090,15.0,5,25,22,20,15,12
road,electric,urban,0.000030,17.0,5,23,20,18,14,11
road,diesel,international,0.000075,16.0,6,30,28,26,20,14
road,electric,international,0.000025,18.0,6,28,26,24,18,13
water,,urban,0.000020,300.0,1,600,500,400,300,200
water,,international,0.000015,600.0,1,1500,1200,1000,800,400
rail,,international,0.000018,900.0,4,1200,1000,900,700,300
";

pub const DEMOLITION_VEHICLES_CSV: &str = "\
network,energy,region,emissions_per_ton_km,tare_weight_tons,axles,capacity_concrete_rubble,capacity_steel_scrap,capacity_wood
road,diesel,urban,0.000090,15.0,5,25,20,18
road,electric,urban,0.000030,17.0,5,23,18,16
water,,urban,0.000020,300.0,1,600,450,350
";

pub const SITES_CSV: &str = "\
lat,lon,in_low_emission_zone,water_accessible,building_type
52.3702,4.8952,1,1,residential
52.3584,4.8811,1,0,office
52.3900,4.9300,0,1,residential
52.3390,4.8720,0,0,office
";

pub const SUPPLIERS_CSV: &str = "\
lat,lon,in_low_emission_zone,water_accessible,supplier_type
51.9244,4.4777,0,1,national
51.2194,4.4025,0,1,international
";

pub const HUBS_CSV: &str = "\
lat,lon,in_low_emission_zone,water_accessible,tier
52.4050,4.8700,0,1,macro
52.3300,4.9500,0,0,macro
52.3730,4.8900,1,1,micro
52.3450,4.8800,0,0,micro
";

pub const DEMOLITION_SITES_CSV: &str = "\
lat,lon,in_low_emission_zone,water_accessible,stock_concrete_rubble,stock_steel_scrap,stock_wood
52.3800,4.8600,0,1,2500,300,200
52.3500,4.9100,0,0,1800,250,150
";

/// Business-as-usual scenario; pass a JSON file path to override.
pub const POLICY_JSON: &str = r#"{
    "hub_topology":       "centralized",
    "network_type":       "road",
    "truck_policy":       "diesel",
    "biobased_policy":    "none",
    "modularity_policy":  "none",
    "circularity_policy": "circular non-structural + structural elements"
}"#;

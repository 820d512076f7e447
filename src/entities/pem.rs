//! PEM stack geometry - physical dimensions and volumetric power density
//!
//! Two stack builds are sized side by side from the same layer list: one with
//! metal bipolar plates and one with carbon plates. Layer thicknesses are in
//! millimeters, areas in cm², volumes in liters.

use serde::{Deserialize, Serialize};

/// Stack construction parameters
///
/// `active_area` and `number_of_cells` mirror the operating-point inputs but
/// are independent fields; nothing keeps them in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PemInputs {
    /// Active electrode area per cell (cm²)
    pub active_area: f64,

    pub number_of_cells: u32,

    /// Anode flow-field channel depth (mm)
    pub anode_channel_depth: f64,

    /// Cathode flow-field channel depth (mm)
    pub cathode_channel_depth: f64,

    /// Coolant channel height (mm)
    pub coolant_channel_height: f64,

    /// Share of the plate footprint that is electrochemically active (%)
    pub active_cell_percentage: f64,

    /// Metal bipolar plate thickness (mm)
    pub metal_plate_thickness: f64,

    /// Carbon bipolar plate thickness (mm)
    pub carbon_plate_thickness: f64,

    /// Additional per-cell layer thickness (mm)
    pub additional_layer_thickness: f64,

    /// Membrane electrode assembly thickness (mm)
    pub mea_thickness: f64,

    pub anode_collector_thickness: f64,
    pub cathode_collector_thickness: f64,
    pub anode_isolation_thickness: f64,
    pub cathode_isolation_thickness: f64,
    pub anode_end_plate_thickness: f64,
    pub cathode_end_plate_thickness: f64,
}

impl Default for PemInputs {
    fn default() -> Self {
        Self {
            active_area: 100.0,
            number_of_cells: 1,
            anode_channel_depth: 0.5,
            cathode_channel_depth: 0.5,
            coolant_channel_height: 1.0,
            active_cell_percentage: 80.0,
            metal_plate_thickness: 0.1,
            carbon_plate_thickness: 1.0,
            additional_layer_thickness: 0.0,
            mea_thickness: 0.5,
            anode_collector_thickness: 2.0,
            cathode_collector_thickness: 2.0,
            anode_isolation_thickness: 0.5,
            cathode_isolation_thickness: 0.5,
            anode_end_plate_thickness: 10.0,
            cathode_end_plate_thickness: 10.0,
        }
    }
}

impl PemInputs {
    /// Thickness of one repeating cell: two plates around the MEA (mm)
    pub fn cell_thickness(&self, plate_thickness: f64) -> f64 {
        plate_thickness * 2.0 + self.mea_thickness
    }

    /// Full stack height for a given plate thickness (mm)
    ///
    /// Repeating cells, then collectors, isolation layers and end plates at
    /// both ends, summed in that order.
    pub fn stack_height(&self, plate_thickness: f64) -> f64 {
        f64::from(self.number_of_cells) * self.cell_thickness(plate_thickness)
            + self.anode_collector_thickness
            + self.cathode_collector_thickness
            + self.anode_isolation_thickness
            + self.cathode_isolation_thickness
            + self.anode_end_plate_thickness
            + self.cathode_end_plate_thickness
    }

    /// Plate footprint: active area inflated by the active share (cm²)
    pub fn stack_base_area(&self) -> f64 {
        self.active_area / (self.active_cell_percentage / 100.0)
    }

    /// Fields in declaration order, for validation and display
    pub fn fields(&self) -> [(&'static str, f64); 16] {
        [
            ("active_area", self.active_area),
            ("number_of_cells", f64::from(self.number_of_cells)),
            ("anode_channel_depth", self.anode_channel_depth),
            ("cathode_channel_depth", self.cathode_channel_depth),
            ("coolant_channel_height", self.coolant_channel_height),
            ("active_cell_percentage", self.active_cell_percentage),
            ("metal_plate_thickness", self.metal_plate_thickness),
            ("carbon_plate_thickness", self.carbon_plate_thickness),
            ("additional_layer_thickness", self.additional_layer_thickness),
            ("mea_thickness", self.mea_thickness),
            ("anode_collector_thickness", self.anode_collector_thickness),
            ("cathode_collector_thickness", self.cathode_collector_thickness),
            ("anode_isolation_thickness", self.anode_isolation_thickness),
            ("cathode_isolation_thickness", self.cathode_isolation_thickness),
            ("anode_end_plate_thickness", self.anode_end_plate_thickness),
            ("cathode_end_plate_thickness", self.cathode_end_plate_thickness),
        ]
    }
}

/// Metal and carbon stack sizing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PemResults {
    /// mm
    pub metal_stack_height: f64,
    /// mm
    pub carbon_stack_height: f64,
    /// cm²
    pub stack_base_area: f64,
    /// L
    pub metal_stack_volume: f64,
    /// L
    pub carbon_stack_volume: f64,
    /// kW/L
    pub metal_stack_power_density: f64,
    /// kW/L
    pub carbon_stack_power_density: f64,
}

impl PemResults {
    pub fn fields(&self) -> [(&'static str, f64); 7] {
        [
            ("metal_stack_height", self.metal_stack_height),
            ("carbon_stack_height", self.carbon_stack_height),
            ("stack_base_area", self.stack_base_area),
            ("metal_stack_volume", self.metal_stack_volume),
            ("carbon_stack_volume", self.carbon_stack_volume),
            ("metal_stack_power_density", self.metal_stack_power_density),
            ("carbon_stack_power_density", self.carbon_stack_power_density),
        ]
    }
}

/// Stack volume in liters from a height in mm and a base area in cm²
pub fn stack_volume(height_mm: f64, base_area_cm2: f64) -> f64 {
    (height_mm / 10.0) * (base_area_cm2 / 100.0)
}

/// Volumetric power density in kW/L
pub fn volumetric_power_density(stack_power_w: f64, volume_l: f64) -> f64 {
    stack_power_w / volume_l / 1000.0
}

/// Size both stack builds for `stack_power` watts of output
pub fn compute_pem(inputs: &PemInputs, stack_power: f64) -> PemResults {
    let metal_stack_height = inputs.stack_height(inputs.metal_plate_thickness);
    let carbon_stack_height = inputs.stack_height(inputs.carbon_plate_thickness);
    let stack_base_area = inputs.stack_base_area();

    let metal_stack_volume = stack_volume(metal_stack_height, stack_base_area);
    let carbon_stack_volume = stack_volume(carbon_stack_height, stack_base_area);

    log::debug!(
        "PEM stack of {} cells: metal {} mm / {} L, carbon {} mm / {} L",
        inputs.number_of_cells,
        metal_stack_height,
        metal_stack_volume,
        carbon_stack_height,
        carbon_stack_volume
    );

    let results = PemResults {
        metal_stack_height,
        carbon_stack_height,
        stack_base_area,
        metal_stack_volume,
        carbon_stack_volume,
        metal_stack_power_density: volumetric_power_density(stack_power, metal_stack_volume),
        carbon_stack_power_density: volumetric_power_density(stack_power, carbon_stack_volume),
    };

    for (field, value) in results.fields() {
        if !value.is_finite() {
            log::warn!("{} is not finite ({})", field, value);
        }
    }

    results
}

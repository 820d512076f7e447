//! FCC: Fuel Cell Calculator
//!
//! Steady-state fuel cell performance from operating conditions: current and
//! power density, electrical efficiency, fuel utilization, overpotential
//! losses, Nernst voltage and stack power. PEM cells also get a stack sizing
//! model (height, footprint, volume and volumetric power density for metal
//! and carbon bipolar plates), and every scenario yields a sampled
//! voltage/current/power curve.
//!
//! The calculators are pure functions over plain value types and never
//! reject inputs; degenerate inputs surface as infinities or NaN. Input
//! validation in [`core::validation`] is a separate, opt-in step.

pub mod cli;
pub mod core;
pub mod entities;
pub mod schema;
pub mod yaml;

//! UI layer: panels (controls) and chart rendering.

pub mod panels;
pub mod plot;

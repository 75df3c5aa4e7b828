//! # garden-sensors
//!
//! Floor humidity and temperature readings for GardenGes.
//!
//! [`EwelinkSensorProvider`] reads real devices through the eWeLink cloud
//! and assigns them to floors; [`MockSensorProvider`] simulates them.
//! [`FallbackSensorProvider`] combines the two so sensor reads never fail.

pub mod config;
pub mod ewelink;
pub mod mock;
pub mod provider;

pub use config::{EwelinkConfig, EwelinkCredentials};
pub use ewelink::{DeviceListing, DeviceSummary, EwelinkClient, EwelinkDevice};
pub use mock::MockSensorProvider;
pub use provider::{EwelinkSensorProvider, FallbackSensorProvider, MOCK_NOTE};

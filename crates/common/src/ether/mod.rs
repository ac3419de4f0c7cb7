pub mod params;
pub mod provider;
pub mod rpc;

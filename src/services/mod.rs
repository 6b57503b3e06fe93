pub mod distribution_builder;
pub mod forecast;
pub mod forecast_config;
pub mod histogram;
pub mod monte_carlo_sampler;
pub mod percentiles;
pub mod rainfall_csv;
pub mod rainfall_plot;
pub mod rainfall_yaml;
pub mod simulation_types;

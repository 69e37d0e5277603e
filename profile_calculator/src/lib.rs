pub mod averager;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod data_loader;
pub mod error;
pub mod merger;
pub mod models;
pub mod pipeline;
pub mod resampler;
pub mod timestamp;

pub use averager::HourlyAverager;
pub use catalog::{ProfileCatalog, ProfileEntry, SeasonSources};
pub use classifier::DayTypeClassifier;
pub use config::PipelineConfig;
pub use data_loader::DataLoader;
pub use error::{ProfileError, ProfileResult};
pub use merger::ProfileMerger;
pub use models::{DayType, DemandProfile, MergedRow, MergedTable, ProfileKey, Season};
pub use pipeline::{compute_profile, ProfilePipeline, ProfileSet};
pub use resampler::HourlyResampler;

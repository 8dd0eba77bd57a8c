pub mod bands;
pub mod buckets;
pub mod config;
pub mod recommendations;
pub mod validation;

pub use bands::{Rating, RatingScale};
pub use buckets::{Bucket, BucketTable, RangeOp};
pub use config::{
    BiasScoringConfig, BiasWeights, BucketConfig, CurriculumScoringConfig,
    PedagogyScoringConfig, PedagogyWeights, ScoringConfig,
};
pub use recommendations::Recommendations;
pub use validation::validate_scoring;

//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and external systems.

pub mod ai;
pub mod nutrition;
pub mod profile;
pub mod recipes;
pub mod streak;

pub use ai::AiService;
pub use nutrition::NutritionService;
pub use profile::ProfileService;
pub use recipes::RecipeService;
pub use streak::StreakService;

//! Nutrition Tracker Shared Library
//!
//! Domain core shared by the backend service and the WASM bindings: goal
//! calculation, food log creation, daily aggregation, streak tracking and the
//! recipe catalog. Everything here is synchronous and free of I/O; time comes
//! from an injected [`clock::Clock`].

pub mod aggregation;
pub mod clock;
pub mod errors;
pub mod food_log;
pub mod goals;
pub mod models;
pub mod recipes;
pub mod streak;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use aggregation::{aggregate_day, DailyProgress, DailySummary};
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::*;
pub use food_log::{log_identified_foods, log_recipe_servings};
pub use goals::*;
pub use models::*;
pub use recipes::{RecipeCatalog, RecipeFilter};
pub use streak::StreakState;
pub use types::*;

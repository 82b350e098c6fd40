//! Recipe catalog: browsing, suggestions, favorites and generated recipes

use crate::models::{DietaryPreference, MealCategory, Recipe, RecipeDraft};

const BUILTIN_CATALOG: &str = include_str!("../data/recipes.json");

/// Number of recipes offered as dashboard suggestions
pub const SUGGESTION_LIMIT: usize = 3;

/// Total minutes at or under which a recipe counts as quick
pub const QUICK_RECIPE_MINUTES: u32 = 30;

/// Browse filter applied after the dietary filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecipeFilter {
    #[default]
    All,
    Meal(MealCategory),
    Quick,
}

impl RecipeFilter {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            RecipeFilter::All => true,
            RecipeFilter::Meal(category) => recipe.meal_types.contains(category),
            RecipeFilter::Quick => recipe.total_time_minutes() <= QUICK_RECIPE_MINUTES,
        }
    }
}

impl std::str::FromStr for RecipeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "all" => Ok(RecipeFilter::All),
            "quick" => Ok(RecipeFilter::Quick),
            other => other
                .parse::<MealCategory>()
                .map(RecipeFilter::Meal)
                .map_err(|_| "Must be one of: all, breakfast, lunch, dinner, snacks, quick".to_string()),
        }
    }
}

/// Whether a recipe is acceptable under a dietary preference
///
/// `All` accepts everything; any other preference must appear in the tags.
pub fn matches_preference(recipe: &Recipe, preference: DietaryPreference) -> bool {
    preference == DietaryPreference::All || recipe.dietary_tags.contains(&preference)
}

/// Read-only set of curated recipes
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    /// The catalog compiled into the crate
    pub fn builtin() -> Result<Self, serde_json::Error> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse a JSON array of recipes
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)?;
        Ok(Self::new(recipes))
    }

    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    /// Catalog recipes passing the dietary preference and then the filter
    pub fn browse(&self, filter: RecipeFilter, preference: DietaryPreference) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| matches_preference(recipe, preference))
            .filter(|recipe| filter.matches(recipe))
            .collect()
    }

    /// First recipes whose serving fits strictly under the remaining calories
    pub fn suggest(&self, remaining_calories: f64, preference: DietaryPreference) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| {
                recipe.calories_per_serving < remaining_calories
                    && matches_preference(recipe, preference)
            })
            .take(SUGGESTION_LIMIT)
            .collect()
    }
}

/// Assign id and image to a freshly generated recipe
///
/// The id is `ai-{unix_millis}`; a clash with an `existing` recipe within the
/// same millisecond gets a `-2`, `-3`, ... suffix.
pub fn finalize_generated(draft: RecipeDraft, unix_millis: i64, existing: &[Recipe]) -> Recipe {
    let base = format!("ai-{unix_millis}");
    let taken = |id: &str| existing.iter().any(|recipe| recipe.id == id);
    let id = if taken(&base) {
        (2u32..)
            .map(|n| format!("{base}-{n}"))
            .find(|candidate| !taken(candidate))
            .unwrap_or(base)
    } else {
        base
    };
    draft.into_recipe(id, format!("https://picsum.photos/seed/{unix_millis}/400/300"))
}

/// Insert a generated recipe so the list stays newest first
pub fn push_generated(generated: &mut Vec<Recipe>, recipe: Recipe) {
    generated.insert(0, recipe);
}

/// Flip a recipe's favorite status; returns whether it is now a favorite
pub fn toggle_favorite(favorites: &mut Vec<String>, recipe_id: &str) -> bool {
    if let Some(pos) = favorites.iter().position(|id| id == recipe_id) {
        favorites.remove(pos);
        false
    } else {
        favorites.push(recipe_id.to_string());
        true
    }
}

use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cuisine {
    SouthIndian,
    NorthIndian,
    Italian,
    Chinese,
    Mexican,
    Thai,
    Japanese,
    Mediterranean,
    American,
    French,
}

impl Cuisine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cuisine::SouthIndian => "South Indian",
            Cuisine::NorthIndian => "North Indian",
            Cuisine::Italian => "Italian",
            Cuisine::Chinese => "Chinese",
            Cuisine::Mexican => "Mexican",
            Cuisine::Thai => "Thai",
            Cuisine::Japanese => "Japanese",
            Cuisine::Mediterranean => "Mediterranean",
            Cuisine::American => "American",
            Cuisine::French => "French",
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DietaryRestriction {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    NutFree,
    Diabetic,
    Halal,
    Kosher,
    LowCalorie,
    LowFat,
    LowSodium,
}

impl DietaryRestriction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryRestriction::Vegetarian => "Vegetarian",
            DietaryRestriction::Vegan => "Vegan",
            DietaryRestriction::GlutenFree => "Gluten-free",
            DietaryRestriction::DairyFree => "Dairy-free",
            DietaryRestriction::NutFree => "Nut-free",
            DietaryRestriction::Diabetic => "Diabetic",
            DietaryRestriction::Halal => "Halal",
            DietaryRestriction::Kosher => "Kosher",
            DietaryRestriction::LowCalorie => "Low-calorie",
            DietaryRestriction::LowFat => "Low-fat",
            DietaryRestriction::LowSodium => "Low-sodium",
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Comma-separated list of ingredients already in the pantry
    #[arg(short, long)]
    pub ingredients: String,

    /// Dietary restrictions to honor (repeatable)
    #[arg(short = 'r', long = "restriction", value_enum)]
    pub restrictions: Vec<DietaryRestriction>,

    /// Type of cuisine
    #[arg(long, value_enum, default_value_t = Cuisine::SouthIndian)]
    pub cuisine: Cuisine,

    /// Recipe difficulty level
    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    pub difficulty: Difficulty,

    /// Number of servings (1-12)
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub servings: u32,

    /// Target cooking time in minutes (10-240)
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(10..=240))]
    pub cooking_time: u32,

    /// Path the recipe JSON is written to
    #[arg(short, long, default_value = "recipe_output.json")]
    pub output: String,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_servings() {
        let result = Cli::try_parse_from(["recipe_gen", "-i", "rice", "--servings", "13"]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_out_of_range_cooking_time() {
        let result = Cli::try_parse_from(["recipe_gen", "-i", "rice", "--cooking-time", "5"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_full_invocation() {
        let cli = Cli::try_parse_from([
            "recipe_gen",
            "-i",
            "rice, tomatoes, onions",
            "-r",
            "vegetarian",
            "-r",
            "gluten-free",
            "--cuisine",
            "south-indian",
            "--difficulty",
            "easy",
            "--servings",
            "4",
            "--cooking-time",
            "45",
        ])
        .unwrap();
        assert_eq!(cli.cuisine.as_str(), "South Indian");
        assert_eq!(cli.difficulty.as_str(), "Easy");
        assert_eq!(
            cli.restrictions
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>(),
            vec!["Vegetarian", "Gluten-free"]
        );
        assert_eq!(cli.servings, 4);
        assert_eq!(cli.output, "recipe_output.json");
    }
}

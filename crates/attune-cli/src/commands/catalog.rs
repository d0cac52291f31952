use clap::Subcommand;

use attune_core::CatalogRegistry;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List all soundscape categories
    Categories,
    /// List all guided scenarios
    Scenarios,
    /// Show one category or scenario by id
    Show {
        /// Category or scenario id
        id: String,
    },
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = CatalogRegistry::builtin();

    match action {
        CatalogAction::Categories => {
            println!("{}", serde_json::to_string_pretty(catalog.categories())?);
        }
        CatalogAction::Scenarios => {
            println!("{}", serde_json::to_string_pretty(catalog.scenarios())?);
        }
        CatalogAction::Show { id } => {
            if let Some(category) = catalog.category(&id) {
                println!("{}", serde_json::to_string_pretty(category)?);
            } else if let Some(scenario) = catalog.scenario(&id) {
                println!("{}", serde_json::to_string_pretty(scenario)?);
            } else {
                return Err(format!("no category or scenario with id '{id}'").into());
            }
        }
    }

    Ok(())
}

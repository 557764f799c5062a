use anyhow::Result;
use async_trait::async_trait;
use clap::{Args, Subcommand};
use pawfeed::config::ConfigArgs;
use pawfeed::display::{display_list, DisplayStyle};
use pawfeed::pets::{CatAge, NewCat};

use super::{load_factory, RunCommand};

/// Manage cat profiles.
#[derive(Args)]
pub struct PetsCommand {
    #[command(subcommand)]
    pub command: PetsCommands,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Subcommand)]
pub enum PetsCommands {
    /// List cat profiles.
    List {
        /// The display style.
        #[arg(short, long, default_value = "table")]
        output: DisplayStyle,
    },

    /// Add a cat profile.
    Add {
        name: String,

        #[arg(long)]
        years: Option<u32>,

        #[arg(long)]
        months: Option<u32>,

        /// Weight as free text, e.g. `4.2kg`.
        #[arg(long)]
        weight: Option<String>,
    },

    /// Choose the cat whose schedule is being edited.
    Select { id: u32 },
}

#[async_trait]
impl RunCommand for PetsCommand {
    async fn run(&self) -> Result<()> {
        let factory = load_factory(&self.config)?;
        let store = factory.build_pet_store();

        match &self.command {
            PetsCommands::List { output } => {
                let cats = store.list()?;
                display_list(&cats, *output)
            }
            PetsCommands::Add {
                name,
                years,
                months,
                weight,
            } => {
                let age = match (years, months) {
                    (None, None) => None,
                    _ => Some(CatAge {
                        years: years.unwrap_or(0),
                        months: months.unwrap_or(0),
                    }),
                };
                let cat = store.add(NewCat {
                    name: name.clone(),
                    age,
                    weight: weight.clone(),
                })?;
                println!("Added {} with id {}", cat.name, cat.id);
                Ok(())
            }
            PetsCommands::Select { id } => {
                let cat = store.select(*id)?;
                println!("Selected {}", cat.name);
                Ok(())
            }
        }
    }
}

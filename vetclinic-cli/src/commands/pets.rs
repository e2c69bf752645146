use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use shared::models::{OwnerRef, Pet, PetData};

use super::{AppContext, or_dash};

#[derive(Subcommand, Debug)]
pub enum PetCommand {
    /// List pets, optionally filtered
    List {
        /// Only pets of this owner
        #[arg(long, conflicts_with = "species")]
        owner: Option<i64>,
        /// Only pets of this species
        #[arg(long)]
        species: Option<String>,
    },
    /// Show one pet
    Show { id: i64 },
    /// Register a pet for an owner
    Create {
        #[arg(long)]
        name: String,
        /// Owner id
        #[arg(long)]
        owner: i64,
        #[command(flatten)]
        details: PetDetails,
    },
    /// Change a pet; omitted fields keep their current value
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        /// Move the pet to another owner
        #[arg(long)]
        owner: Option<i64>,
        #[command(flatten)]
        details: PetDetails,
    },
    /// Delete a pet
    Delete { id: i64 },
}

#[derive(Args, Debug, Default)]
pub struct PetDetails {
    #[arg(long)]
    species: Option<String>,
    #[arg(long)]
    breed: Option<String>,
    /// Age in years
    #[arg(long)]
    age: Option<i32>,
    /// Weight in kilograms
    #[arg(long)]
    weight: Option<f64>,
    #[arg(long)]
    color: Option<String>,
}

pub async fn run(ctx: &AppContext, command: PetCommand) -> Result<()> {
    let api = ctx.api();
    match command {
        PetCommand::List { owner, species } => {
            let pets = match (owner, species) {
                (Some(owner), _) => api.pets_by_owner(owner).await,
                (None, Some(species)) => api.pets_by_species(&species).await,
                (None, None) => api.pets().await,
            }
            .context("failed to fetch pets")?;
            print_pets(&pets);
        }
        PetCommand::Show { id } => {
            let pet = api
                .pet(id)
                .await
                .with_context(|| format!("failed to fetch pet {id}"))?;
            print_pet(&pet);
        }
        PetCommand::Create {
            name,
            owner,
            details,
        } => {
            let data = PetData {
                name,
                species: details.species,
                breed: details.breed,
                age: details.age,
                weight: details.weight,
                color: details.color,
                owner_id: Some(owner),
                owner: Some(OwnerRef { id: owner }),
            };
            let pet = api.create_pet(&data).await.context("failed to create pet")?;
            println!("Created pet #{}.", pet.id);
            print_pet(&pet);
        }
        PetCommand::Update {
            id,
            name,
            owner,
            details,
        } => {
            let current = api
                .pet(id)
                .await
                .with_context(|| format!("failed to fetch pet {id}"))?;
            let owner_id = owner.or(current.owner.as_ref().map(|owner| owner.id));
            let data = PetData {
                name: name.unwrap_or(current.name),
                species: details.species.or(Some(current.species)),
                breed: details.breed.or(current.breed),
                age: details.age.or(current.age),
                weight: details.weight.or(current.weight),
                color: details.color.or(current.color),
                owner_id,
                owner: owner_id.map(|id| OwnerRef { id }),
            };
            let pet = api
                .update_pet(id, &data)
                .await
                .with_context(|| format!("failed to update pet {id}"))?;
            println!("Updated pet #{}.", pet.id);
            print_pet(&pet);
        }
        PetCommand::Delete { id } => {
            api.delete_pet(id)
                .await
                .with_context(|| format!("failed to delete pet {id}"))?;
            println!("Deleted pet #{id}.");
        }
    }
    Ok(())
}

pub(crate) fn print_pets(pets: &[Pet]) {
    if pets.is_empty() {
        println!("No pets.");
        return;
    }
    println!(
        "{:>5}  {:<16}  {:<12}  {:<16}  {:>4}  {:<20}",
        "ID", "NAME", "SPECIES", "BREED", "AGE", "OWNER"
    );
    for pet in pets {
        println!(
            "{:>5}  {:<16}  {:<12}  {:<16}  {:>4}  {:<20}",
            pet.id,
            pet.name,
            pet.species,
            or_dash(pet.breed.as_deref()),
            or_dash(pet.age),
            or_dash(pet.owner.as_ref().map(|owner| owner.name.as_str()))
        );
    }
}

fn print_pet(pet: &Pet) {
    println!("#{} {}", pet.id, pet.name);
    println!("  species:  {}", pet.species);
    println!("  breed:    {}", or_dash(pet.breed.as_deref()));
    println!("  age:      {}", or_dash(pet.age));
    println!("  weight:   {}", or_dash(pet.weight));
    println!("  color:    {}", or_dash(pet.color.as_deref()));
    if let Some(owner) = &pet.owner {
        println!("  owner:    #{} {}", owner.id, owner.name);
    }
}

use anyhow::{Context, Result};
use clap::Subcommand;
use shared::models::{Owner, OwnerData};

use super::{AppContext, or_dash};

#[derive(Subcommand, Debug)]
pub enum OwnerCommand {
    /// List every owner
    List,
    /// Show one owner and their pets
    Show { id: i64 },
    /// Create an owner
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Change an owner; omitted fields keep their current value
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Delete an owner
    Delete { id: i64 },
}

pub async fn run(ctx: &AppContext, command: OwnerCommand) -> Result<()> {
    let api = ctx.api();
    match command {
        OwnerCommand::List => {
            let owners = api.owners().await.context("failed to fetch owners")?;
            print_owners(&owners);
        }
        OwnerCommand::Show { id } => {
            let owner = api
                .owner(id)
                .await
                .with_context(|| format!("failed to fetch owner {id}"))?;
            print_owner(&owner);
            let pets = api
                .pets_by_owner(id)
                .await
                .with_context(|| format!("failed to fetch pets of owner {id}"))?;
            println!("  pets:     {}", pets.len());
            for pet in pets {
                println!("    #{} {} ({})", pet.id, pet.name, pet.species);
            }
        }
        OwnerCommand::Create {
            name,
            email,
            phone,
            address,
        } => {
            let data = OwnerData {
                name,
                email,
                phone,
                address,
            };
            let owner = api
                .create_owner(&data)
                .await
                .context("failed to create owner")?;
            println!("Created owner #{}.", owner.id);
            print_owner(&owner);
        }
        OwnerCommand::Update {
            id,
            name,
            email,
            phone,
            address,
        } => {
            let current = api
                .owner(id)
                .await
                .with_context(|| format!("failed to fetch owner {id}"))?;
            let data = OwnerData {
                name: name.unwrap_or(current.name),
                email: email.unwrap_or(current.email),
                phone: phone.or(current.phone),
                address: address.or(current.address),
            };
            let owner = api
                .update_owner(id, &data)
                .await
                .with_context(|| format!("failed to update owner {id}"))?;
            println!("Updated owner #{}.", owner.id);
            print_owner(&owner);
        }
        OwnerCommand::Delete { id } => {
            api.delete_owner(id)
                .await
                .with_context(|| format!("failed to delete owner {id}"))?;
            println!("Deleted owner #{id}.");
        }
    }
    Ok(())
}

pub(crate) fn print_owners(owners: &[Owner]) {
    if owners.is_empty() {
        println!("No owners.");
        return;
    }
    println!("{:>5}  {:<24}  {:<28}  {:<14}", "ID", "NAME", "EMAIL", "PHONE");
    for owner in owners {
        println!(
            "{:>5}  {:<24}  {:<28}  {:<14}",
            owner.id,
            owner.name,
            owner.email,
            or_dash(owner.phone.as_deref())
        );
    }
}

fn print_owner(owner: &Owner) {
    println!("#{} {}", owner.id, owner.name);
    println!("  email:    {}", owner.email);
    println!("  phone:    {}", or_dash(owner.phone.as_deref()));
    println!("  address:  {}", or_dash(owner.address.as_deref()));
}

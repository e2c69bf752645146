//! `open` and `routes`: the navigation table rendered in a terminal.

use anyhow::{Context, Result, bail};
use client::{ROUTES, RouteTarget, View, routes};
use shared::models::Appointment;

use super::{
    AppContext, appointments::print_appointments, or_dash, owners::print_owners,
    pets::print_pets,
};

/// Prints the navigation table.
pub fn print_routes() {
    println!("{:<15}  {:<13}  TARGET", "PATH", "NAME");
    for route in ROUTES {
        let target = match route.target {
            RouteTarget::View(view) => format!("{view} view"),
            RouteTarget::Redirect(to) => format!("redirect to {to}"),
        };
        println!("{:<15}  {:<13}  {target}", route.path, or_dash(route.name));
    }
}

/// Resolves `path` and renders the view it leads to.
pub async fn open(ctx: &AppContext, path: &str) -> Result<()> {
    let Some(view) = routes::resolve(path) else {
        bail!("no view is mapped to `{path}`; run `vetclinic routes` to list paths");
    };
    println!("== {view} ==");

    let api = ctx.api();
    let session = ctx.store.snapshot();
    match view {
        View::Login => {
            if session.is_authenticated() {
                println!("Signed in as {}.", session.user_name());
                println!("Run `vetclinic logout` to switch accounts.");
            } else {
                println!("Run `vetclinic login --username <name>` to sign in.");
            }
        }
        View::Register => {
            println!(
                "Run `vetclinic register --username <name> --email <email> --first-name <first> --last-name <last>` to create an account."
            );
        }
        View::Dashboard => {
            if session.is_authenticated() {
                match session.user_role() {
                    Some(role) => println!("Welcome, {} ({role}).", session.user_name()),
                    None => println!("Welcome, {}.", session.user_name()),
                }
            }
            let owners = api.owners().await.context("failed to fetch owners")?;
            let pets = api.pets().await.context("failed to fetch pets")?;
            let today = api
                .todays_appointments()
                .await
                .context("failed to fetch today's appointments")?;
            println!("Owners:              {}", owners.len());
            println!("Pets:                {}", pets.len());
            println!("Appointments today:  {}", today.len());
            print_appointments(&today);
        }
        View::Owners => {
            let owners = api.owners().await.context("failed to fetch owners")?;
            print_owners(&owners);
        }
        View::Pets => {
            let pets = api.pets().await.context("failed to fetch pets")?;
            print_pets(&pets);
        }
        View::Appointments => {
            let appointments = api
                .appointments()
                .await
                .context("failed to fetch appointments")?;
            print_appointments(&appointments);
        }
        View::Treatments => {
            let appointments = api
                .appointments()
                .await
                .context("failed to fetch appointments")?;
            print_treatments(&appointments);
        }
    }
    Ok(())
}

fn print_treatments(appointments: &[Appointment]) {
    let rows: Vec<_> = appointments
        .iter()
        .flat_map(|appointment| {
            appointment
                .treatments
                .iter()
                .flatten()
                .map(move |treatment| (appointment, treatment))
        })
        .collect();
    if rows.is_empty() {
        println!("No treatments.");
        return;
    }

    println!(
        "{:>5}  {:>5}  {:<16}  {:<24}  {:<24}  {:>8}",
        "ID", "APPT", "PET", "DIAGNOSIS", "TREATMENT", "COST"
    );
    for (appointment, treatment) in rows {
        println!(
            "{:>5}  {:>5}  {:<16}  {:<24}  {:<24}  {:>8}",
            treatment.id,
            appointment.id,
            or_dash(appointment.pet.as_ref().map(|pet| pet.name.as_str())),
            treatment.diagnosis,
            treatment.treatment,
            or_dash(treatment.cost.map(|cost| format!("{cost:.2}")))
        );
    }
}

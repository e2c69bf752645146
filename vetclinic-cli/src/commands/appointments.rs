use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use clap::{Args, Subcommand};
use shared::models::{Appointment, AppointmentData, AppointmentStatus};

use super::{AppContext, or_dash};

/// Format used for appointment times in tables.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Subcommand, Debug)]
pub enum AppointmentCommand {
    /// List appointments, optionally filtered
    List(AppointmentFilter),
    /// Show one appointment with its treatments
    Show { id: i64 },
    /// Book an appointment
    Create {
        /// Pet id
        #[arg(long)]
        pet: i64,
        /// Veterinarian id
        #[arg(long)]
        vet: i64,
        /// Local date and time, e.g. 2025-03-01T09:30:00
        #[arg(long)]
        at: NaiveDateTime,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Change an appointment; omitted fields keep their current value
    Update {
        id: i64,
        #[arg(long)]
        pet: Option<i64>,
        #[arg(long)]
        vet: Option<i64>,
        #[arg(long)]
        at: Option<NaiveDateTime>,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Set the status of an appointment
    Status {
        id: i64,
        /// scheduled, completed or cancelled
        status: AppointmentStatus,
    },
    /// Cancel an appointment
    Cancel { id: i64 },
    /// Delete an appointment
    Delete { id: i64 },
}

#[derive(Args, Debug)]
#[group(multiple = false)]
pub struct AppointmentFilter {
    /// Only appointments of this pet
    #[arg(long)]
    pet: Option<i64>,
    /// Only appointments with this veterinarian
    #[arg(long)]
    vet: Option<i64>,
    /// Only appointments in this status
    #[arg(long)]
    status: Option<AppointmentStatus>,
    /// Only today's appointments
    #[arg(long)]
    today: bool,
}

pub async fn run(ctx: &AppContext, command: AppointmentCommand) -> Result<()> {
    let api = ctx.api();
    match command {
        AppointmentCommand::List(filter) => {
            let appointments = if let Some(pet) = filter.pet {
                api.appointments_by_pet(pet).await
            } else if let Some(vet) = filter.vet {
                api.appointments_by_veterinarian(vet).await
            } else if let Some(status) = filter.status {
                api.appointments_by_status(status).await
            } else if filter.today {
                api.todays_appointments().await
            } else {
                api.appointments().await
            }
            .context("failed to fetch appointments")?;
            print_appointments(&appointments);
        }
        AppointmentCommand::Show { id } => {
            let appointment = api
                .appointment(id)
                .await
                .with_context(|| format!("failed to fetch appointment {id}"))?;
            print_appointment(&appointment);
        }
        AppointmentCommand::Create {
            pet,
            vet,
            at,
            reason,
        } => {
            let data = AppointmentData {
                pet_id: pet,
                veterinarian_id: vet,
                appointment_date_time: at,
                reason,
            };
            let appointment = api
                .create_appointment(&data)
                .await
                .context("failed to create appointment")?;
            println!("Booked appointment #{}.", appointment.id);
            print_appointment(&appointment);
        }
        AppointmentCommand::Update {
            id,
            pet,
            vet,
            at,
            reason,
        } => {
            let current = api
                .appointment(id)
                .await
                .with_context(|| format!("failed to fetch appointment {id}"))?;
            let Some(pet_id) = pet.or(current.pet.as_ref().map(|pet| pet.id)) else {
                bail!("appointment {id} has no pet; pass --pet");
            };
            let Some(veterinarian_id) = vet.or(current.veterinarian.as_ref().map(|vet| vet.id))
            else {
                bail!("appointment {id} has no veterinarian; pass --vet");
            };
            let data = AppointmentData {
                pet_id,
                veterinarian_id,
                appointment_date_time: at.unwrap_or(current.appointment_date_time),
                reason: reason.or(current.reason),
            };
            let appointment = api
                .update_appointment(id, &data)
                .await
                .with_context(|| format!("failed to update appointment {id}"))?;
            println!("Updated appointment #{}.", appointment.id);
            print_appointment(&appointment);
        }
        AppointmentCommand::Status { id, status } => {
            let appointment = api
                .update_appointment_status(id, status)
                .await
                .with_context(|| format!("failed to update status of appointment {id}"))?;
            println!("Appointment #{} is now {}.", appointment.id, appointment.status);
        }
        AppointmentCommand::Cancel { id } => {
            let appointment = api
                .cancel_appointment(id)
                .await
                .with_context(|| format!("failed to cancel appointment {id}"))?;
            println!("Appointment #{} is now {}.", appointment.id, appointment.status);
        }
        AppointmentCommand::Delete { id } => {
            api.delete_appointment(id)
                .await
                .with_context(|| format!("failed to delete appointment {id}"))?;
            println!("Deleted appointment #{id}.");
        }
    }
    Ok(())
}

pub(crate) fn print_appointments(appointments: &[Appointment]) {
    if appointments.is_empty() {
        println!("No appointments.");
        return;
    }
    println!(
        "{:>5}  {:<16}  {:<10}  {:<16}  {:<20}  {:<24}",
        "ID", "WHEN", "STATUS", "PET", "VETERINARIAN", "REASON"
    );
    for appointment in appointments {
        println!(
            "{:>5}  {:<16}  {:<10}  {:<16}  {:<20}  {:<24}",
            appointment.id,
            appointment.appointment_date_time.format(TIME_FORMAT).to_string(),
            appointment.status.as_str(),
            or_dash(appointment.pet.as_ref().map(|pet| pet.name.as_str())),
            or_dash(appointment.veterinarian.as_ref().map(|vet| vet.name.as_str())),
            or_dash(appointment.reason.as_deref())
        );
    }
}

fn print_appointment(appointment: &Appointment) {
    println!(
        "#{} on {} ({})",
        appointment.id,
        appointment.appointment_date_time.format(TIME_FORMAT),
        appointment.status
    );
    if let Some(pet) = &appointment.pet {
        println!("  pet:      #{} {} ({})", pet.id, pet.name, pet.species);
    }
    if let Some(vet) = &appointment.veterinarian {
        println!("  vet:      #{} {}", vet.id, vet.name);
    }
    println!("  reason:   {}", or_dash(appointment.reason.as_deref()));
    for treatment in appointment.treatments.iter().flatten() {
        println!(
            "  treated:  {} - {} ({})",
            treatment.diagnosis,
            treatment.treatment,
            or_dash(treatment.cost)
        );
    }
}

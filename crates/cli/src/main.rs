use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clinic_core::components::appointment::Appointment;
use clinic_core::components::directory::{User, UserRole};
use clinic_core::components::vitals::{MetricKey, MetricValue};
use clinic_core::constants::DEFAULT_PAGE_LIMIT;
use clinic_core::repositories::vitals::{MetricSeries, VitalsSummary};
use clinic_core::shaping::pagination::PageRequest;
use clinic_core::shaping::ranges::{classify_metric, reference_range};
use clinic_core::shaping::schedule::{parse_legacy_prescription, Frequency};
use clinic_core::shaping::search::AppointmentTab;
use clinic_core::shaping::series::format_metric;
use clinic_core::{ClinicServices, CoreConfig};

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Clinic records CLI")]
struct Cli {
    /// YAML seed file to load instead of the built-in data
    #[arg(long, global = true, env = "CLINIC_SEED_FILE")]
    seed_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a prescription schedule phrase
    Schedule {
        /// daily, weekly, alternate or custom
        frequency: String,
        /// Doses per day, for daily schedules
        #[arg(long, default_value = "1")]
        times_per_day: String,
        /// Free text, for custom schedules
        #[arg(long, default_value = "")]
        custom: String,
    },
    /// Split a legacy "Name - Dosage - Schedule" string
    ParsePrescription {
        text: String,
    },
    /// Classify a metric value against its reference range
    Classify {
        /// Metric key, e.g. glucose or blood_pressure
        metric: String,
        value: String,
    },
    /// Search patients
    Patients {
        #[arg(short, long, default_value = "")]
        query: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
        limit: usize,
    },
    /// List appointments
    Appointments {
        #[arg(short, long, default_value = "")]
        query: String,
        /// all, a status name, in-clinic, or status:<name> / mode:<name>
        #[arg(long, default_value = "all")]
        tab: String,
        /// Show only what this doctor would see
        #[arg(long)]
        doctor: Option<String>,
    },
    /// Show a patient's latest vitals, or one metric's series
    Vitals {
        patient_id: String,
        #[arg(long)]
        metric: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("No command given. Try --help.");
        return Ok(());
    };

    match command {
        Commands::Schedule {
            frequency,
            times_per_day,
            custom,
        } => {
            let frequency = Frequency::from_form(&frequency, &times_per_day, &custom)?;
            println!("{}", frequency.schedule_text());
        }
        Commands::ParsePrescription { text } => {
            let parsed = parse_legacy_prescription(&text);
            let defaulted = parsed.is_defaulted();
            let p = parsed.into_value();
            println!("Name:     {}", p.name);
            println!("Dosage:   {}", p.dosage);
            println!("Schedule: {}", p.schedule);
            if defaulted {
                println!("(not in Name - Dosage - Schedule form; kept as name only)");
            }
        }
        Commands::Classify { metric, value } => {
            let key: MetricKey = metric.parse()?;
            println!("{}", classify_line(key, &value));
        }
        Commands::Patients { query, page, limit } => {
            let services = load_services(cli.seed_file)?;
            let page = services
                .directory
                .list_patients(&query, PageRequest::new(page, limit)?)?;
            if page.data.is_empty() {
                println!("No patients found.");
            }
            for patient in &page.data {
                println!(
                    "ID: {}, Name: {}, Age: {}, Phone: {}",
                    patient.id, patient.name, patient.age, patient.contact.phone
                );
            }
            println!(
                "Page {} of {} ({} total)",
                page.pagination.page, page.pagination.pages, page.pagination.total
            );
        }
        Commands::Appointments { query, tab, doctor } => {
            let services = load_services(cli.seed_file)?;
            let tab: AppointmentTab = tab.parse()?;
            let viewer = cli_viewer(doctor);
            let page = services.appointments.list(
                &viewer,
                &query,
                tab,
                PageRequest::new(1, clinic_core::constants::MAX_PAGE_LIMIT)?,
            )?;
            if page.data.is_empty() {
                println!("No appointments found.");
            }
            for appointment in &page.data {
                println!("{}", appointment_line(appointment));
            }
        }
        Commands::Vitals { patient_id, metric } => {
            let services = load_services(cli.seed_file)?;
            match metric {
                Some(metric) => {
                    let series = services.vitals.series(&patient_id, metric.parse()?)?;
                    print_series(&series);
                }
                None => match services.vitals.latest(&patient_id)? {
                    Some(summary) => print_summary(&summary),
                    None => println!("No vitals recorded for {patient_id}."),
                },
            }
        }
    }

    Ok(())
}

fn load_services(seed_file: Option<PathBuf>) -> anyhow::Result<ClinicServices> {
    let cfg = CoreConfig::new(seed_file, DEFAULT_PAGE_LIMIT)?;
    Ok(ClinicServices::load(&cfg)?)
}

/// The CLI runs as admin unless asked to look through a doctor's eyes.
fn cli_viewer(doctor_id: Option<String>) -> User {
    let role = if doctor_id.is_some() {
        UserRole::Doctor
    } else {
        UserRole::Admin
    };
    User {
        id: "cli".into(),
        name: "Command line".into(),
        email: String::new(),
        password: String::new(),
        role,
        doctor_id,
    }
}

fn classify_line(key: MetricKey, raw: &str) -> String {
    let value = match raw.trim().parse::<f64>() {
        Ok(n) if key != MetricKey::BloodPressure => MetricValue::Number(n),
        _ => MetricValue::Text(raw.trim().to_string()),
    };
    let display = format_metric(key, &value);
    let label = key.label();

    match (classify_metric(key, &value), reference_range(key)) {
        (Some(status), Some(range)) if key != MetricKey::BloodPressure => format!(
            "{label}: {display} is {status} (normal {}-{} {})",
            range.min, range.max, range.unit
        ),
        (Some(status), _) => format!("{label}: {display} is {status}"),
        (None, Some(_)) => format!("{label}: {display} (unreadable, not classified)"),
        (None, None) => format!("{label}: {display} (no reference range)"),
    }
}

fn appointment_line(a: &Appointment) -> String {
    format!(
        "{} {} {} | {} with {} | {} | {}",
        a.id,
        a.date,
        a.time,
        a.patient.name,
        a.doctor.name,
        a.appointment_type.as_str(),
        a.status
    )
}

fn print_summary(summary: &VitalsSummary) {
    println!("Latest vitals ({})", summary.date);
    for reading in &summary.readings {
        let status = reading
            .status
            .map(|s| format!(" [{s}]"))
            .unwrap_or_default();
        println!("  {:<15} {}{}", reading.label, reading.display, status);
    }
}

fn print_series(series: &MetricSeries) {
    println!("{} ({})", series.label, series.unit.unwrap_or("no unit"));
    if series.points.is_empty() {
        println!("  no readings");
    }
    for point in &series.points {
        let flag = if point.value.is_defaulted() {
            " (unreadable, shown as 0)"
        } else {
            ""
        };
        println!("  {} {:?}{}", point.date, point.value.value(), flag);
    }
}

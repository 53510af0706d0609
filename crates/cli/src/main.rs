use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use medcare_core::{
    IngestionService, JsonFileStore, MatchingService, NewTip, RecordStore, SeedBundle,
    SymptomCheck, TipService,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(name = "medcare")]
#[command(about = "MedCare disease and preventive tip store CLI")]
struct Cli {
    /// Directory holding the JSON record files
    #[arg(long, global = true, env = "MEDCARE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all disease records
    ListDiseases,
    /// List all preventive tips
    ListTips,
    /// Load a YAML seed file into empty collections
    Seed {
        /// Path to the YAML seed file
        file: PathBuf,
    },
    /// Add a preventive tip
    AddTip {
        title: String,
        category: String,
        description: String,
        /// Image URL
        image: String,
    },
    /// Run the symptom checker against the store
    Check {
        /// Disease name or symptom
        input: String,
        #[arg(long)]
        age: Option<f64>,
        /// male, female or any
        #[arg(long)]
        sex: Option<String>,
        /// Days the symptoms have lasted
        #[arg(long)]
        duration: Option<f64>,
    },
    /// Print a random preventive tip
    RandomTip {
        /// Fixed seed for a reproducible pick
        #[arg(long)]
        seed: Option<u64>,
    },
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'medcare --help' for commands");
        return Ok(());
    };

    let Some(data_dir) = cli.data_dir else {
        return Err("no data directory: pass --data-dir or set MEDCARE_DATA_DIR".into());
    };

    run(command, data_dir)
}

/// Runs one command against the store in `data_dir`. Any failure is returned so the process
/// exits non-zero.
fn run(command: Commands, data_dir: PathBuf) -> CliResult<()> {
    let store: Arc<dyn RecordStore> = Arc::new(JsonFileStore::open(data_dir)?);

    match command {
        Commands::ListDiseases => {
            let records = MatchingService::new(store).list_records()?;
            if records.is_empty() {
                println!("No disease records found.");
            }
            for record in records {
                let medicines: Vec<&str> =
                    record.medicines.iter().map(|m| m.name.as_str()).collect();
                println!(
                    "ID: {}, Disease: {}, Symptoms: [{}], Medicines: [{}]",
                    record.id,
                    record.disease_name,
                    record.symptoms.join(", "),
                    medicines.join(", ")
                );
            }
        }
        Commands::ListTips => {
            let tips = TipService::new(store, Vec::new()).list_all()?;
            if tips.is_empty() {
                println!("No preventive tips found.");
            }
            for tip in tips {
                println!(
                    "ID: {}, Title: {}, Category: {}, Created: {}",
                    tip.id,
                    tip.title,
                    tip.category,
                    tip.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        Commands::Seed { file } => {
            let bundle = SeedBundle::from_yaml_file(&file)?;
            let (diseases, tips) = IngestionService::new(store)
                .seed(bundle)
                .map_err(|e| format!("Error seeding store: {}", e))?;
            println!("Seeded {} disease records and {} tips", diseases, tips);
        }
        Commands::AddTip {
            title,
            category,
            description,
            image,
        } => {
            let tip = NewTip {
                title: Some(title),
                category: Some(category),
                description: Some(description),
                image: Some(image),
            };
            let tip = IngestionService::new(store)
                .add_tip(tip)
                .map_err(|e| format!("Error adding tip: {}", e))?;
            println!("Added preventive tip with ID: {}", tip.id);
        }
        Commands::Check {
            input,
            age,
            sex,
            duration,
        } => {
            let request = SymptomCheck {
                input: Some(input),
                age,
                sex,
                duration_days: duration,
            };
            let outcome = MatchingService::new(store).check(&request)?;
            let reasons = &outcome.suitability.reasons;
            println!("Disease: {}", outcome.record.disease_name);
            for medicine in &outcome.record.medicines {
                println!("  Medicine: {} ({})", medicine.name, medicine.short_info);
            }
            for remedy in &outcome.record.home_remedies {
                println!("  Home remedy: {}", remedy);
            }
            if !outcome.record.precautions.is_empty() {
                println!("Precautions: {}", outcome.record.precautions);
            }
            println!(
                "Suitable: {} (min age ok: {}, max age ok: {}, gender ok: {})",
                outcome.suitability.suitable,
                reasons.min_age_ok,
                reasons.max_age_ok,
                reasons.gender_ok
            );
            if !outcome.extra_note.is_empty() {
                println!("{}", outcome.extra_note);
            }
        }
        Commands::RandomTip { seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let tip = TipService::new(store, Vec::new()).random_tip(&mut rng)?;
            println!("{} [{}]\n{}", tip.title, tip.category, tip.description);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SEED: &str = r#"
diseases:
  - diseaseName: Fever
    symptoms: [high temperature]
    minAge: 5
    maxAge: 80
tips:
  - title: Wash hands
    category: Hygiene
    description: Use soap for twenty seconds.
    image: https://example.org/hands.png
"#;

    fn seed_file(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("seed.yaml");
        fs::write(&path, contents).expect("Failed to write seed file");
        path
    }

    #[test]
    fn test_seed_then_check_succeeds() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("data");
        let file = seed_file(&temp_dir, SEED);

        run(Commands::Seed { file }, data_dir.clone()).unwrap();
        run(
            Commands::Check {
                input: "fever".into(),
                age: Some(4.5),
                sex: None,
                duration: Some(4.5),
            },
            data_dir.clone(),
        )
        .unwrap();
        run(Commands::RandomTip { seed: Some(7) }, data_dir).unwrap();
    }

    #[test]
    fn test_failed_seed_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("data");

        let file = seed_file(&temp_dir, "diseases:\n  - diseaseName: Flu\n    minAge: 70\n    maxAge: 10\n");
        assert!(run(Commands::Seed { file }, data_dir.clone()).is_err());

        let file = seed_file(&temp_dir, "diseases: [unclosed");
        assert!(run(Commands::Seed { file }, data_dir).is_err());
    }

    #[test]
    fn test_invalid_tip_and_missed_check_are_errors() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().to_path_buf();

        let add = Commands::AddTip {
            title: " ".into(),
            category: "Hygiene".into(),
            description: "Soap".into(),
            image: "https://example.org/x.png".into(),
        };
        let err = run(add, data_dir.clone()).unwrap_err();
        assert!(err.to_string().contains("All fields are required."));

        let check = Commands::Check {
            input: "malaria".into(),
            age: None,
            sex: None,
            duration: None,
        };
        assert!(run(check, data_dir.clone()).is_err());

        assert!(run(Commands::RandomTip { seed: None }, data_dir).is_err());
    }
}

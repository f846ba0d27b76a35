use dotenv::dotenv;
use hifz_lessons::config::{Config, VERSE_FILE_VAR};
use hifz_lessons::{generate_lesson_plan, LessonError, VerseData};
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

type MainResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() {
    // A missing .env is fine, everything can come from the real environment
    let _ = dotenv();
    pretty_env_logger::init();

    if let Err(err) = run().await {
        error!("{}", err);
        std::process::exit(1);
    }
}

async fn run() -> MainResult {
    let config = Config::from_env()?;

    let path = std::env::args_os()
        .nth(1)
        .map(Into::into)
        .or(config.verse_file.clone())
        .ok_or_else(|| {
            LessonError::Config(format!(
                "no verse file given, pass a path or set {}",
                VERSE_FILE_VAR
            ))
        })?;

    info!("Loading verse data from {}", path.display());
    let bytes = tokio::fs::read(&path).await.map_err(LessonError::from)?;
    let data = VerseData::from_slice(&bytes)?;
    debug!("Loaded {} words", data.words.len());

    let mut rng: Box<dyn RngCore> = match config.lesson_seed {
        Some(seed) => {
            info!("Using lesson seed {}", seed);
            Box::new(StdRng::seed_from_u64(seed))
        }
        None => Box::new(rand::thread_rng()),
    };

    let plan = generate_lesson_plan(data.verse.as_ref(), &data.words, &mut *rng)?;

    let json = if config.pretty {
        serde_json::to_string_pretty(&plan)?
    } else {
        serde_json::to_string(&plan)?
    };
    println!("{}", json);

    Ok(())
}

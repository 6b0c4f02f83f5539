use chrono::Local;
use clap::Args;

#[derive(Args)]
pub struct ParseArgs {
    /// Phrase to parse, e.g. "Call Mom in 15 min"
    pub text: String,
    /// Print the parsed expression as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ParseArgs) -> i32 {
    let now = Local::now();
    let Some(parsed) = inkdown_core::parse(&args.text, now) else {
        eprintln!("No time expression found.");
        return 1;
    };

    if args.json {
        match serde_json::to_string_pretty(&parsed) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return 1;
            }
        }
        return 0;
    }

    let kind = if parsed.is_duration {
        "duration"
    } else if parsed.is_explicit_date {
        "date"
    } else {
        "clock time"
    };
    println!("Matched:  {:?} ({kind})", parsed.matched_text(&args.text));
    println!("Target:   {}", parsed.target_time.format("%Y-%m-%d %H:%M"));
    let remaining = parsed.target_time - now;
    println!(
        "Fires in: {}h {:02}m {:02}s",
        remaining.num_hours(),
        remaining.num_minutes() % 60,
        remaining.num_seconds() % 60
    );
    match parsed.label {
        Some(label) => println!("Label:    {label}"),
        None => println!("Label:    (none)"),
    }
    0
}

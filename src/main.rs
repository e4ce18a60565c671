use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;

use devis_pdf::{DiscountState, Error, Quote, QuoteInput, RenderOptions};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render a quote (devis) JSON file into a paginated A4 PDF")]
struct Args {
    /// Quote JSON file: {"quote": {...}, "discount": {"amount": .., "applied": ..}}
    input: Option<PathBuf>,

    /// Output file or directory (default: ./quote-<id>.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Apply a flat discount, overriding the one in the input file
    #[arg(short, long)]
    discount: Option<f64>,

    /// Render date used for the validity notice (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Render the built-in demonstration quote instead of reading INPUT
    #[arg(long)]
    sample: bool,

    /// Print the demonstration quote as JSON and exit
    #[arg(long)]
    print_sample: bool,
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let options = match args.date {
        Some(date) => RenderOptions::new(date),
        None => RenderOptions::today(),
    };

    if args.print_sample {
        let sample = QuoteInput {
            quote: Quote::sample(options.render_date),
            discount: DiscountState::none(),
        };
        println!("{}", serde_json::to_string_pretty(&sample)?);
        return Ok(());
    }

    let mut input = match (&args.input, args.sample) {
        (Some(path), _) => devis_pdf::read_quote_input(path)?,
        (None, true) => QuoteInput {
            quote: Quote::sample(options.render_date),
            discount: DiscountState::none(),
        },
        (None, false) => return Err("no input file given (use --sample for a demo)".into()),
    };
    if let Some(amount) = args.discount {
        input.discount = DiscountState::applied(amount);
    }

    let rendered = match devis_pdf::render_quote(&input.quote, &input.discount, &options) {
        Ok(r) => r,
        Err(e) => {
            if let (Some(line), Some(field)) = (e.line(), e.field()) {
                log::error!("line {line}, field {field} rejected");
            }
            return Err(e.into());
        }
    };

    let file_name = devis_pdf::output_file_name(&input.quote);
    let output = match args.output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path,
        None => PathBuf::from(file_name),
    };
    devis_pdf::write_pdf_file(&output, &rendered.bytes)?;

    let totals = rendered.totals;
    println!(
        "{} ({} page(s)) total HT {:.2}, TVA {:.2}, TTC {:.2}",
        output.display(),
        rendered.page_count,
        totals.total_excluding_tax,
        totals.total_tax,
        totals.total_including_tax,
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(Error::EmptyDocument) = e.downcast_ref::<Error>() {
                eprintln!("Error: the quote has no line items; nothing to render");
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

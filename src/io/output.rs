//! Output formatting and logging utilities

use color_eyre::eyre::Result;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::sync::Arc;
use std::time::SystemTime as StdSystemTime;
use tracing::info;
use tracing_subscriber::{
    fmt::format::Writer, fmt::layer, fmt::time::FormatTime, layer::SubscriberExt,
    util::SubscriberInitExt, Registry,
};

use crate::lambda_impl::LambdaDoublesReport;
use crate::rdm_impl::{RestrictedRdmInputs, UnrestrictedRdmInputs};

/// Custom time formatter that shows only seconds
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = StdSystemTime::now();
        let duration = now
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();

        // Format as HH:MM:SS (only seconds precision)
        let total_seconds = duration.as_secs();
        let hours = (total_seconds / 3600) % 24;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;

        write!(w, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Setup logging to file or stderr; reports themselves go to stdout.
pub fn setup_output(output_path: Option<&String>) {
    match output_path {
        Some(path) => {
            if let Ok(log) = File::create(path) {
                let file_layer = layer()
                    .with_writer(Arc::new(log))
                    .with_timer(SecondPrecisionTimer)
                    .with_ansi(false);
                Registry::default().with(file_layer).init();
                info!("Log output will be written to: {}", path);
            } else {
                eprintln!("Could not create output file: {}", path);
            }
        }
        None => {
            let stderr_layer = layer()
                .with_writer(std::io::stderr)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(true);
            Registry::default().with(stderr_layer).init();
        }
    }
}

/// Print the Lambda doubles report: the raw contracted strings first, then
/// each parsed term with its einsum accumulation lines.
pub fn print_lambda_report<W: Write>(writer: &mut W, report: &LambdaDoublesReport) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "    {}", report.header)?;
    writeln!(writer)?;

    for generated in &report.terms {
        writeln!(writer, "{}", generated.contracted)?;
    }
    writeln!(writer)?;

    for generated in &report.terms {
        writeln!(writer, "#\t {}", generated.term)?;
        for line in &generated.einsum {
            writeln!(writer, "{}", line)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Print the assembled restricted (RHF/ROHF) solver inputs.
pub fn print_restricted_summary<W: Write>(
    writer: &mut W,
    inputs: &RestrictedRdmInputs,
) -> Result<()> {
    writeln!(writer, "eri shape: {:?}", inputs.eri.dim())?;
    writeln!(writer, "norb: {}", inputs.norb)?;
    writeln!(
        writer,
        "h1 shape: ({}, {})",
        inputs.h1.nrows(),
        inputs.h1.ncols()
    )?;
    writeln!(
        writer,
        "nelec: ({}, {}); 2S = {}; multiplicity = {}",
        inputs.nelec.0, inputs.nelec.1, inputs.spin, inputs.multiplicity
    )?;
    writeln!(writer, "constraints: {}", inputs.constraints)?;
    writeln!(
        writer,
        "inputs assembled; hand off to an external v2RDM solver"
    )?;
    Ok(())
}

/// Print the assembled unrestricted (UHF) solver inputs.
pub fn print_unrestricted_summary<W: Write>(
    writer: &mut W,
    inputs: &UnrestrictedRdmInputs,
) -> Result<()> {
    writeln!(writer, "eri_aa shape: {:?}", inputs.eri_aa.dim())?;
    writeln!(writer, "eri_ab shape: {:?}", inputs.eri_ab.dim())?;
    writeln!(writer, "eri_bb shape: {:?}", inputs.eri_bb.dim())?;
    writeln!(writer, "norb: {}", inputs.norb)?;
    writeln!(
        writer,
        "h1a shape: ({}, {}); h1b shape: ({}, {})",
        inputs.h1a.nrows(),
        inputs.h1a.ncols(),
        inputs.h1b.nrows(),
        inputs.h1b.ncols()
    )?;
    writeln!(writer, "index ordering: {:?}", inputs.ordering)?;
    writeln!(
        writer,
        "nelec: ({}, {}); 2S = {}; multiplicity = {}",
        inputs.nelec.0, inputs.nelec.1, inputs.spin, inputs.multiplicity
    )?;
    writeln!(writer, "constraints: {}", inputs.constraints)?;
    writeln!(
        writer,
        "inputs assembled; hand off to an external v2RDM solver"
    )?;
    Ok(())
}

//! `simba-dump capture-file [capture-file ...]` — decodes each capture's
//! Ethernet frames through the protocol stack and Simba decoder, writing a
//! textual dump of every header and message to stdout.

mod pcap;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use simba_core::FrameBuffer;

#[derive(Parser)]
#[command(name = "simba-dump", about = "Dumps MOEX SIMBA/SBE market data out of pcap captures")]
struct Args {
	/// One or more pcap capture files to process, in order.
	#[arg(required = true)]
	captures: Vec<PathBuf>,
}

fn main() -> ExitCode {
	tracing_subscriber::fmt::init();

	let args = Args::parse();
	let stdout = io::stdout();
	let mut out = stdout.lock();

	let mut had_failure = false;
	for path in &args.captures {
		if let Err(err) = process_capture(path, &mut out) {
			tracing::warn!(capture = %path.display(), error = %err, "capture failed");
			eprintln!("{}: {err:#}", path.display());
			had_failure = true;
		}
	}

	if had_failure {
		ExitCode::FAILURE
	} else {
		ExitCode::SUCCESS
	}
}

fn process_capture(path: &PathBuf, out: &mut dyn Write) -> anyhow::Result<()> {
	let file = std::fs::File::open(path)?;
	let mut reader = pcap::CaptureReader::open(io::BufReader::new(file))?;
	tracing::info!(capture = %path.display(), "opened capture");

	let mut frame = FrameBuffer::new();
	let mut index: u64 = 0;

	while let Some(record) = reader.next_record()? {
		if record.len() > frame.capacity() {
			tracing::warn!(capture = %path.display(), frame = index, len = record.len(), "record exceeds frame capacity, skipped");
			index += 1;
			continue;
		}
		if !frame.reset(record.len(), index) {
			tracing::warn!(capture = %path.display(), frame = index, "frame reset rejected record length");
			index += 1;
			continue;
		}
		frame.fill_slice()[..record.len()].copy_from_slice(&record);

		let outcome = simba_core::walk(&mut frame);
		if outcome.reached_udp_payload {
			if let Err(err) = simba_core::simba::decode_payload(&mut frame, out) {
				tracing::warn!(capture = %path.display(), frame = index, error = %err, "simba decode failed");
			}
		} else {
			tracing::debug!(capture = %path.display(), frame = index, protocols = ?outcome.protocols, "frame did not reach a UDP payload");
		}

		tracing::info!(capture = %path.display(), frame = index, "processed");
		index += 1;
	}

	Ok(())
}

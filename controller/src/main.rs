use anyhow::{bail, Context, Result};
use reflow_shared::codec::LineDecoder;
use reflow_shared::command::StatusReport;
use reflow_shared::{Command, Phase, ProcessProfile};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let addr = args.next().unwrap_or_else(|| "127.0.0.1:8080".into());
    let profile = match args.next() {
        Some(spec) => parse_profile_arg(&spec)?,
        None => ProcessProfile {
            soak_temp: 180.0,
            soak_time: 60,
            reflow_peak: 225.0,
            reflow_time: 30,
        },
    };

    println!("Connecting to oven at {}", addr);
    let mut stream = TcpStream::connect(&addr)
        .await
        .with_context(|| format!("connect to {}", addr))?;

    let mut decoder = LineDecoder::new();
    let mut buf = vec![0u8; 1024];

    let start = format!(
        "START;{:.1};{};{:.1};{}\n",
        profile.soak_temp, profile.soak_time, profile.reflow_peak, profile.reflow_time
    );
    stream.write_all(start.as_bytes()).await?;
    let ack = read_line(&mut stream, &mut decoder, &mut buf).await?;
    println!("Run started, oven replied: {}", ack);

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                stream.write_all(b"STOP\n").await?;
                let line = read_line(&mut stream, &mut decoder, &mut buf).await?;
                println!("Interrupted, stop acknowledged: {}", line);
                break;
            }
            _ = ticker.tick() => {
                stream.write_all(b"STATUS?\n").await?;
                let line = read_line(&mut stream, &mut decoder, &mut buf).await?;

                match StatusReport::parse(&line) {
                    Ok(report) => {
                        println!(
                            "[{}] temp={:.1}C goal={:.1}C countdown={}s",
                            report.phase, report.current_temp, report.goal_temp, report.countdown
                        );
                        if report.phase == Phase::Complete {
                            println!("Cycle complete.");
                            break;
                        }
                    }
                    Err(_) => println!("Unparsed reply: {}", line),
                }
            }
        }
    }

    Ok(())
}

/// Read one reply line, blocking until the oven sends it
async fn read_line(
    stream: &mut TcpStream,
    decoder: &mut LineDecoder,
    buf: &mut [u8],
) -> Result<String> {
    loop {
        if let Some(line) = decoder.next_line()? {
            return Ok(line);
        }
        let n = stream.read(buf).await?;
        if n == 0 {
            bail!("oven closed the connection");
        }
        decoder.extend(&buf[..n]);
    }
}

/// Parse a profile argument using the wire field layout:
/// `soak_temp;soak_time;reflow_peak;reflow_time`
fn parse_profile_arg(spec: &str) -> Result<ProcessProfile> {
    match reflow_shared::command::parse(&format!("START;{}", spec))? {
        Command::Start(profile) => Ok(profile),
        _ => bail!("invalid profile spec: '{}'", spec),
    }
}

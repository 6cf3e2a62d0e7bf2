use bacwire_core::decode_frame;
use bacwire_tools::parse_hex;
use clap::Parser;
use std::io::Read;

#[derive(Parser, Debug)]
#[command(name = "bacwire-decode", about = "Decode a BACnet/IP frame given as hex")]
struct Args {
    /// Frame bytes in hex; read from stdin when omitted.
    hex: Option<String>,
    /// Print the decoded tree as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let input = match args.hex {
        Some(hex) => hex,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let bytes = parse_hex(&input)?;
    log::debug!("decoding {} bytes", bytes.len());

    match decode_frame(&bytes) {
        Ok(frame) if args.json => println!("{}", serde_json::to_string_pretty(&frame)?),
        Ok(frame) => println!("{frame:#?}"),
        Err(e) => {
            eprintln!("decode failed: {e}");
            std::process::exit(1);
        }
    }
    Ok(())
}

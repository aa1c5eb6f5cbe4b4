use clap::Parser;
use serde::Serialize;
use snabi_codec::json::{encode_calldata_json, felts_to_json};
use snabi_codec::{decode_calldata, decode_event, decode_outputs, Value};
use snabi_parser::{compute_selector_hex, hash_many, HashFunction, TypeDescriptor};
use tracing_subscriber::{fmt, EnvFilter};

mod abi;
mod args;
mod error;

use abi::load_abi;
use args::{Command, SnabiArgs};
use error::{Error, SnabiCliResult};

fn main() -> SnabiCliResult<()> {
    let args = SnabiArgs::parse();
    init_logging(args.json_logs)?;

    tracing::trace!("args: {:?}", args);

    match args.command {
        Command::Selector { name } => {
            println!("{}", compute_selector_hex(&name)?);
        }
        Command::ParseType { type_path } => {
            println!("{:#?}", TypeDescriptor::parse(&type_path)?);
        }
        Command::Encode { target, args } => {
            let abi = load_abi(&target.abi)?;
            let json: serde_json::Value = serde_json::from_str(&args)?;

            let calldata = encode_calldata_json(&abi, &target.function, &json)?;
            print_json(&felts_to_json(&calldata))?;
        }
        Command::Decode {
            target,
            calldata,
            data,
        } => {
            let abi = load_abi(&target.abi)?;

            if calldata {
                let inputs = decode_calldata(&abi, &target.function, &data)?;
                print_json(&Value::Struct(inputs))?;
            } else {
                print_json(&decode_outputs(&abi, &target.function, &data)?)?;
            }
        }
        Command::Event { abi, keys, data } => {
            let abi = load_abi(&abi)?;
            print_json(&decode_event(&abi, &keys, &data)?)?;
        }
        Command::Hash { poseidon, felts } => {
            let function = if poseidon {
                HashFunction::Poseidon
            } else {
                HashFunction::Pedersen
            };

            println!("{:#x}", hash_many(function, &felts));
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> SnabiCliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn init_logging(json: bool) -> SnabiCliResult<()> {
    const DEFAULT_LOG_FILTER: &str = "info,snabi=debug";

    let filter = EnvFilter::try_from_default_env()
        .or(EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .map_err(|e| Error::Other(format!("Tracing error: {:?}", e)))?;

    // Logs go to stderr, stdout carries the command output.
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| Error::Other(format!("Tracing error: {:?}", e)))
}

//! Snabi CLI arguments.
//!
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use starknet::core::types::Felt;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct SnabiArgs {
    #[arg(long, global = true)]
    #[arg(help = "Output logs as JSON.")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Compute the selector of a function or event name.")]
    Selector {
        #[arg(value_name = "NAME")]
        name: String,
    },

    #[command(about = "Parse a Cairo type string and print its descriptor.")]
    ParseType {
        #[arg(value_name = "TYPE")]
        type_path: String,
    },

    #[command(about = "Encode the calldata of a function from JSON arguments.")]
    Encode {
        #[command(flatten)]
        target: FunctionTarget,

        #[arg(long)]
        #[arg(value_name = "JSON")]
        #[arg(default_value = "[]")]
        #[arg(help = "Arguments as a JSON array (positional) or object (by name).")]
        args: String,
    },

    #[command(about = "Decode the outputs, or the calldata, of a function.")]
    Decode {
        #[command(flatten)]
        target: FunctionTarget,

        #[arg(long)]
        #[arg(help = "Decode the felts as the function inputs instead of its outputs.")]
        calldata: bool,

        #[arg(long, value_delimiter = ',')]
        #[arg(value_name = "FELTS")]
        #[arg(help = "Comma separated felts.")]
        data: Vec<Felt>,
    },

    #[command(about = "Decode an emitted event.")]
    Event {
        #[arg(long)]
        #[arg(value_name = "PATH")]
        #[arg(help = "Path of the ABI, or the Sierra class, JSON file.")]
        abi: Utf8PathBuf,

        #[arg(long, value_delimiter = ',')]
        #[arg(value_name = "FELTS")]
        #[arg(help = "Comma separated event keys, the first one being the event selector.")]
        keys: Vec<Felt>,

        #[arg(long, value_delimiter = ',')]
        #[arg(value_name = "FELTS")]
        #[arg(help = "Comma separated event data.")]
        data: Vec<Felt>,
    },

    #[command(about = "Hash a sequence of felts.")]
    Hash {
        #[arg(long)]
        #[arg(help = "Use Poseidon instead of Pedersen.")]
        poseidon: bool,

        #[arg(value_name = "FELTS", value_delimiter = ',')]
        felts: Vec<Felt>,
    },
}

#[derive(Debug, Args, Clone)]
pub struct FunctionTarget {
    #[arg(long)]
    #[arg(value_name = "PATH")]
    #[arg(help = "Path of the ABI, or the Sierra class, JSON file.")]
    pub abi: Utf8PathBuf,

    #[arg(long)]
    #[arg(value_name = "NAME_OR_SELECTOR")]
    #[arg(help = "Function name, or its selector as 0x prefixed hex.")]
    pub function: String,
}

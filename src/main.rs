use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use anyhow::Result;
use clap::{App, load_yaml, value_t};
use env_logger::Builder;
use jemallocator::Jemalloc;
use log::info;
use log::LevelFilter::*;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::flag::register;
use flowavro::args::opt;
use flowavro::export::{self, Config, Export, AVRO_BLOCKSIZE, DEFAULT_CODEC, SCHEMA};
use flowavro::flow::Source;

#[global_allocator]
static ALLOC: Jemalloc = Jemalloc;

fn main() -> Result<()> {
    let yaml = load_yaml!("args.yml");
    let ver  = env!("CARGO_PKG_VERSION");
    let args = App::from_yaml(&yaml).version(ver).get_matches();

    let (module, level) = match args.occurrences_of("verbose") {
        0 => (Some(module_path!()), Info),
        1 => (Some(module_path!()), Debug),
        2 => (Some(module_path!()), Trace),
        _ => (None,                 Trace),
    };
    Builder::from_default_env().filter(module, level).init();

    if args.is_present("schema") {
        print!("{}", SCHEMA);
        return Ok(());
    }

    let read  = value_t!(args, "read",  String)?;
    let write = value_t!(args, "write", String)?;
    let codec = args.value_of("codec").unwrap_or(DEFAULT_CODEC);
    let block = opt(args.value_of("block-size"))?.unwrap_or(AVRO_BLOCKSIZE);

    let config = Config {
        codec:      export::codec(codec)?,
        block_size: block,
    };

    info!("initializing flowavro {}", ver);

    let shutdown = Arc::new(AtomicBool::new(false));
    register(SIGTERM, shutdown.clone())?;
    register(SIGINT,  shutdown.clone())?;

    let source = Source::open(&read)?;
    let mut export = Export::create(&write, config)?;

    let result = export.export_all(source, &shutdown);

    let count = export.count();
    export.finish()?.sync_all()?;

    info!("exported {} flows to {}", count, write);

    result
}

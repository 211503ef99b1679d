use anyhow::Result;
use clap::Parser;
use convnet_topology::{
    model::print_model_stats::print_model_stats, Architecture, BackendConfig, DataFormat,
    EnvBackend, TopologyConfig,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "convnet_topology", about = "Print the layer stack of a small CNN")]
struct Args {
    /// shallownet or minivggnet
    #[arg(short, long, default_value = "minivggnet")]
    arch: Architecture,

    #[arg(long, default_value_t = 32)]
    width: usize,

    #[arg(long, default_value_t = 32)]
    height: usize,

    #[arg(long, default_value_t = 3)]
    depth: usize,

    #[arg(short, long, default_value_t = 10)]
    classes: usize,

    /// Leave out the batch normalization layers
    #[arg(long)]
    no_batch_norm: bool,

    /// channels_first or channels_last; read from IMAGE_DATA_FORMAT when omitted
    #[arg(long)]
    data_format: Option<DataFormat>,

    /// Print the topology as JSON instead of a summary table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = TopologyConfig {
        width: args.width,
        height: args.height,
        depth: args.depth,
        classes: args.classes,
        batch_norm: !args.no_batch_norm,
    }
    .build()?;

    let backend: Box<dyn BackendConfig> = match args.data_format {
        Some(format) => Box::new(format),
        None => Box::new(EnvBackend::new()),
    };

    let model = args.arch.build(&config, &*backend)?;
    info!("{} has {} layers", args.arch, model.len());

    if args.json {
        println!("{}", model.to_json()?);
    } else {
        print_model_stats(&model)?;
    }

    Ok(())
}

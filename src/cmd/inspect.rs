use crate::reports;
use clap::Args;
use tourforge::config::InstanceParams;
use tourforge::error::TfResult;
use tourforge::instance::Instance;

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// TSPLIB instance file.
    pub instance: String,

    #[command(flatten)]
    pub params: InstanceParams,

    /// Size of the distance sample shown.
    #[arg(long, default_value_t = 5)]
    pub sample: usize,
}

pub fn run(args: InspectArgs) -> TfResult<()> {
    let instance = Instance::load_from_file(&args.instance)?.with_rounding(args.params.rounding());
    reports::print_instance(&instance);
    reports::print_distance_sample(&instance, args.sample);
    Ok(())
}

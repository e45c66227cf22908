use std::io;
use std::process;
use std::time::Duration;

use ping_probe::PingProbeConfig;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(argh::FromArgs)]
/// ping-probe - send ICMP ECHO_REQUEST packets to an IPv4 host
struct Args {
    #[argh(option, short = 'n', default = "ping_probe::DEFAULT_COUNT")]
    /// number of echo requests to send
    num: u32,

    #[argh(option, short = 'l', default = "ping_probe::DEFAULT_PAYLOAD_SIZE")]
    /// payload size in bytes
    large: usize,

    #[argh(option, short = 'w', default = "ping_probe::DEFAULT_TIMEOUT_MS")]
    /// time to wait for each reply, in milliseconds
    wait: u64,

    #[argh(switch, short = 'v')]
    /// trace socket activity on stderr
    verbose: bool,

    #[argh(positional)]
    /// host name or IPv4 address
    host: String,
}

fn main() {
    let args: Args = argh::from_env();

    let max_level = if args.verbose { Level::TRACE } else { Level::WARN };
    let subscriber = FmtSubscriber::builder().with_max_level(max_level).with_writer(io::stderr).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("ping-probe: could not install logger: {e}");
    }

    let config = PingProbeConfig {
        count: args.num,
        payload_size: args.large,
        timeout: Duration::from_millis(args.wait),
        ..PingProbeConfig::new(args.host)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = ping_probe::run(&config, &mut out) {
        eprintln!("ping-probe: {e}");
        process::exit(1);
    }
}

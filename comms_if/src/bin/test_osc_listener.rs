//! Simple OSC listener test
//!
//! Binds to a UDP port and prints every OSC message it receives, decoding servo duty cycle
//! messages. Point the hexapod exec at this listener to watch gait cycles without a robot.

use comms_if::{
    eqpt::hexapod::ActId,
    net::{OscSocket, SocketOptions},
};
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "test_osc_listener")]
struct Opt {
    /// Local address to listen on
    #[structopt(default_value = "0.0.0.0:9000")]
    bind_addr: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = Opt::from_args();

    // Create the socket
    let socket = OscSocket::new(&SocketOptions {
        bind_addr: opt.bind_addr,
        ..Default::default()
    })?;

    println!("Listening on {}", socket.local_addr()?);

    loop {
        match socket.recv() {
            Ok((msg, from)) => match msg.as_pwm_duty() {
                // Channels are one based
                Some((ch, duty)) if ch >= 1 && (ch as usize) <= ActId::ALL.len() => println!(
                    "{}: {:?} -> {:.2} %",
                    from,
                    ActId::ALL[ch as usize - 1],
                    duty
                ),
                _ => println!("{}: {} {:?}", from, msg.addr, msg.args),
            },
            Err(e) => println!("Received invalid message: {}", e),
        }
    }
}

//! # Hexapod Control Executable
//!
//! This executable walks the hexapod under keyboard control:
//! - The arrow keys step forwards/backwards or spin left/right on the spot
//! - Any other key exits
//!
//! Joint demands are sent to the OSC servo board given in `params/hexapod_exec.toml`.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Result};
use comms_if::net::OscSocket;
use log::{error, info};

// Internal
use hexapod_lib::{
    cmd_loop,
    gait::{GaitSequencer, ThreadSettle},
    keyboard::KeyboardSource,
    params::HexapodExecParams,
    position_table::PositionTable,
    servo_ctrl::ServoCtrl,
};
use util::{
    host,
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session =
        Session::new("hexapod_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!(
        "{} {}\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    info!(
        "Running on: {:#?}",
        host::get_uname().wrap_err("Failed to get host information")?
    );
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let params: HexapodExecParams = util::params::load("hexapod_exec.toml")
        .wrap_err("Could not load hexapod_exec params")?;

    info!("Parameters loaded");

    // ---- MAIN LOOP ----

    let mut keyboard = KeyboardSource::new();

    info!("Use arrow keys to control hexapod. Press any other key to exit.");

    if let Err(e) = run(&params, &mut keyboard) {
        error!("Error: {:#}", e);

        println!("Press any key to exit...");
        keyboard
            .wait_any_key()
            .wrap_err("Failed to wait for the exit key")?;
    }

    info!("Exiting");

    Ok(())
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Open the servo board and run the command loop until the operator exits.
fn run(params: &HexapodExecParams, keyboard: &mut KeyboardSource) -> Result<()> {
    // ---- SERVO BOARD INITIALISATION ----

    let mut socket = OscSocket::new(&params.socket).wrap_err("Failed to create the OSC socket")?;
    socket
        .connect(&params.servo_board_endpoint)
        .wrap_err("Failed to connect to the servo board")?;

    info!(
        "Servo board at {:?} (configured as {:?})",
        socket.peer(),
        params.servo_board_endpoint
    );

    let servo_ctrl = ServoCtrl::new(socket, PositionTable::default());
    let mut sequencer = GaitSequencer::new(servo_ctrl, ThreadSettle, params.settle_period())
        .wrap_err("Failed to build the gait cycles")?;

    sequencer
        .validate()
        .wrap_err("Gait cycles demand positions missing from the position table")?;

    info!("Gait sequencer initialised, entering command loop");

    // ---- COMMAND LOOP ----

    cmd_loop::run(keyboard, &mut sequencer).wrap_err("Command loop failed")?;

    sequencer.into_servo_ctrl().into_driver().close();

    Ok(())
}

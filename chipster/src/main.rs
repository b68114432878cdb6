extern crate chip8;
extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
extern crate rand;

mod looper;
mod render;

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use chip8::{Beeper, Chip8};
use looper::Step;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

error_chain! {
    foreign_links {
        Chip8(chip8::Error);
        Io(io::Error);
    }

    errors {
        BadKey(key: String) {
            description("bad key")
            display("not a hex key: '{}'", key)
        }
    }
}

/// One interpreter step per frame in watch mode, roughly 60 Hz.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

struct CommandArgs {
    rom_file_name: String,
    steps: u64, // default: 1000
    seed: Option<u64>,
    keys: Vec<u8>,
    watch: bool,
}

impl CommandArgs {
    fn parse() -> Result<CommandArgs> {
        use clap::{App, Arg};

        let matches = App::new("chip8 interpreter")
            .arg(
                Arg::with_name("ROM_FILE")
                    .help("rom file to load")
                    .required(true),
            )
            .arg(
                Arg::with_name("steps")
                    .short("n")
                    .long("steps")
                    .value_name("steps")
                    .help("How many instructions to execute before printing the screen.")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("seed")
                    .short("s")
                    .long("seed")
                    .value_name("seed")
                    .help("Seed for the random number generator, for reproducible runs.")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("keys")
                    .short("k")
                    .long("keys")
                    .value_name("keys")
                    .help("Comma separated hex keys held down for the whole run, e.g. 5,A.")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("watch")
                    .short("w")
                    .long("watch")
                    .help("Redraw the terminal whenever the screen changes."),
            )
            .get_matches();

        let steps = matches
            .value_of("steps")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1000);

        let seed = matches
            .value_of("seed")
            .and_then(|s| s.parse::<u64>().ok());

        let keys = match matches.value_of("keys") {
            Some(keys) => parse_keys(keys)?,
            None => Vec::new(),
        };

        let rom_file_name = matches
            .value_of("ROM_FILE")
            .ok_or("ROM_FILE is required")?
            .to_string();

        Ok(CommandArgs {
            rom_file_name,
            steps,
            seed,
            keys,
            watch: matches.is_present("watch"),
        })
    }
}

fn parse_keys(keys: &str) -> Result<Vec<u8>> {
    keys.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(|key| match u8::from_str_radix(key, 16) {
            Ok(value) if value < 16 => Ok(value),
            _ => Err(Error::from(ErrorKind::BadKey(key.to_string()))),
        })
        .collect()
}

fn read_rom<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    use std::io::Read;

    let mut rom_file = File::open(path)?;
    let mut rom_buffer = Vec::new();
    rom_file.read_to_end(&mut rom_buffer)?;
    Ok(rom_buffer)
}

/// Rings the terminal bell.
struct TerminalBeeper;

impl Beeper for TerminalBeeper {
    fn beep(&mut self) {
        info!("beep");
        eprint!("\x07");
    }
}

fn main() {
    use std::process::exit;

    env_logger::init();

    match do_run() {
        Ok(_) => exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}

fn do_run() -> Result<()> {
    let args = CommandArgs::parse()?;
    let app = App::new(&args)?;
    app.run()
}

struct App<'a> {
    command_args: &'a CommandArgs,
    vm: Chip8,
}

impl<'a> App<'a> {
    fn new(command_args: &'a CommandArgs) -> Result<App<'a>> {
        let rom_data = read_rom(&command_args.rom_file_name)?;

        let rng: Box<dyn RngCore> = match command_args.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(rand::thread_rng()),
        };
        let mut vm = Chip8::with_rng(rng);
        vm.load_program(&rom_data)?;
        vm.set_beeper(Box::new(TerminalBeeper));

        let keypad = vm.keypad();
        for &key in &command_args.keys {
            keypad.press(key);
        }

        Ok(App { command_args, vm })
    }

    fn run(mut self) -> Result<()> {
        if self.command_args.watch {
            self.run_watched()?;
        } else {
            for _ in 0..self.command_args.steps {
                self.vm.step()?;
            }
            print!("{}", render::render_text(&self.vm.display));
        }

        debug!("{:?}", self.vm);
        Ok(())
    }

    fn run_watched(&mut self) -> Result<()> {
        let mut steps_left = self.command_args.steps;
        let vm = &mut self.vm;

        looper::start_loop(FRAME_INTERVAL, || {
            if steps_left == 0 {
                return Ok(Step::Done);
            }
            vm.step()?;
            steps_left -= 1;

            if vm.display.take_draw_flag() {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                write!(out, "\x1b[H\x1b[2J{}", render::render_text(&vm.display))?;
                out.flush()?;
            }

            Ok(Step::Cont)
        })
    }
}

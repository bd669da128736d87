use std::{
    fmt,
    io::{self, BufRead, Write},
};

use anyhow::Context;
use clap::{App, Arg};
use rand::Rng;

use seabattle::{
    board::{column_letter, random::random_fleet_spec, CellView, Coordinate, GRID_SIZE},
    game::{CannotShootReason, GameState, Player, Resolution, SetupError, ShotOutcome, ShotReport},
    score::{JsonFileStore, Leaderboard, ScoreStore},
    ships::ShipKind,
};

/// Leaderboard file used when `--scores` is not given.
const DEFAULT_SCORES: &str = "battleship-scores.json";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = App::new("Battleship")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Two-player battleship for a shared terminal.")
        .arg(
            Arg::with_name("scores")
                .short("s")
                .long("scores")
                .value_name("FILE")
                .help("file the leaderboard is kept in")
                .takes_value(true)
                .default_value(DEFAULT_SCORES),
        )
        .arg(
            Arg::with_name("leaderboard")
                .short("l")
                .long("leaderboard")
                .help("print the leaderboard and exit"),
        )
        .get_matches();

    let scores = matches.value_of("scores").unwrap_or(DEFAULT_SCORES);
    let store = JsonFileStore::open(scores)
        .with_context(|| format!("failed to open leaderboard {}", scores))?;
    log::debug!("using leaderboard {}", store.path().display());
    let mut leaderboard = Leaderboard::new(store);

    if matches.is_present("leaderboard") {
        show_leaderboard(&leaderboard);
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = InputReader::new(stdin.lock());
    let mut rng = rand::thread_rng();

    let mut game = GameState::new();
    for &player in Player::ALL.iter() {
        choose_placement(&mut rng, &mut game, player, &mut input)?;
    }

    loop {
        let shooter = game.current_turn();
        hand_over(&game, shooter, &mut input)?;
        show_boards(&game, shooter);

        let report = choose_shot(&mut game, shooter, &mut input)?;
        show_report(&game, &report);
        input.wait("Press Enter to continue.")?;

        match game.dismiss_result() {
            Some(Resolution::Finished { winner, .. }) => {
                finish(&game, winner, &mut leaderboard)?;
                break;
            }
            Some(Resolution::NextTurn(_)) | None => {}
        }
    }
    Ok(())
}

/// Ask the placing player for their name and fleet until the fleet is accepted.
fn choose_placement(
    rng: &mut impl Rng,
    game: &mut GameState,
    player: Player,
    input: &mut InputReader<impl BufRead>,
) -> io::Result<()> {
    println!();
    println!("{}, enter your name.", player);
    let name = input.read_input("name>", |name| {
        if name.is_empty() {
            println!("Your name can't be empty.");
            None
        } else {
            Some(name.to_owned())
        }
    })?;

    println!();
    println!("Place your ships, {}. Type help or ? for the format.", name);
    loop {
        let spec = input.read_input("fleet>", |spec| match spec.to_ascii_lowercase().as_str() {
            "" => None,
            "?" | "help" | "h" => {
                print_placement_help();
                None
            }
            "random" | "rand" => Some(random_fleet_spec(rng)),
            _ => Some(spec.to_owned()),
        })?;
        match game.submit_placement(&name, &spec) {
            Ok(_) => {
                println!("Fleet accepted:");
                show_board(revealed_rows(game, player));
                input.wait("Press Enter and pass the terminal on.")?;
                clear_screen();
                return Ok(());
            }
            Err(SetupError::Placement(err)) => println!("Invalid placement: {}. Please try again.", err),
            Err(SetupError::PlacementClosed) => return Ok(()),
        }
    }
}

fn print_placement_help() {
    println!(
        "Enter all three ships on one line, separated by semicolons:
    A:A1-A5;B:B1-B4;S:C1-C3

Each ship is its letter, an optional colon, and the cells at both of its ends,
optionally in parentheses, e.g. \"B:(D2-D5)\". Ships run along a row or a column.

Available Ships:
    A  aircraft carrier, 5 spaces
    B  battleship, 4 spaces
    S  submarine, 3 spaces

Type \"random\" to have your ships placed for you."
    );
}

/// Show the turn banner and wait until the next player is at the keyboard.
fn hand_over(game: &GameState, player: Player, input: &mut InputReader<impl BufRead>) -> io::Result<()> {
    clear_screen();
    println!("It is now {}'s turn!", game.stats(player).name());
    input.wait("Press Enter to continue...")
}

/// Read target cells until a shot is accepted.
fn choose_shot(
    game: &mut GameState,
    shooter: Player,
    input: &mut InputReader<impl BufRead>,
) -> io::Result<ShotReport> {
    let target = shooter.opponent();
    loop {
        let coord = input.read_input("fire at>", |text| match text.parse::<Coordinate>() {
            Ok(coord) => Some(coord),
            Err(_) if text.is_empty() => None,
            Err(err) => {
                println!("{}", err);
                None
            }
        })?;
        match game.fire_at(target, coord) {
            Ok(report) => return Ok(report),
            Err(CannotShootReason::AlreadyShot) => println!("You already fired at {}.", coord),
            Err(_) => {}
        }
    }
}

/// Print the hit/miss overlay for a shot.
fn show_report(game: &GameState, report: &ShotReport) {
    println!();
    match report.outcome {
        ShotOutcome::Miss => println!("Missed at {}!", report.coord),
        outcome => {
            println!("Hit ship at {}!", report.coord);
            if let (true, Some(kind)) = (outcome.sank(), outcome.ship()) {
                println!(
                    "You sunk {}'s {}!",
                    game.stats(report.target).name(),
                    kind
                );
            }
        }
    }
}

/// Congratulate the winner and update the leaderboard.
fn finish<S: ScoreStore>(
    game: &GameState,
    winner: Player,
    leaderboard: &mut Leaderboard<S>,
) -> anyhow::Result<()> {
    clear_screen();
    println!("Congratulations {}, you won!", game.stats(winner).name());
    println!();
    println!("Leaderboards");
    if let Some(entry) = game.final_entry() {
        println!("Score: {}", entry.score());
        if leaderboard
            .record(&entry)
            .context("failed to save the leaderboard")?
            .is_some()
        {
            println!("New high score!");
        }
    }
    show_leaderboard(leaderboard);
    Ok(())
}

/// Print every leaderboard entry in slot order.
fn show_leaderboard<S: ScoreStore>(leaderboard: &Leaderboard<S>) {
    let entries = leaderboard.snapshot();
    if entries.is_empty() {
        println!("No scores yet.");
    }
    for entry in entries {
        println!("{}: {}", entry.name(), entry.score());
    }
}

/// Show the shooter's own board with ships, then the target's board with ships hidden.
fn show_boards(game: &GameState, shooter: Player) {
    let target = shooter.opponent();
    println!();
    println!("{}'s Board", game.stats(shooter).name());
    show_board(revealed_rows(game, shooter));
    println!();
    println!("{}'s Board", game.stats(target).name());
    show_board(hidden_rows(game, target));
    println!();
}

/// Rows of a player's board with every ship shown.
fn revealed_rows<'a>(
    game: &'a GameState,
    player: Player,
) -> impl 'a + Iterator<Item = impl 'a + Iterator<Item = RevealedCell>> {
    cell_rows(game, player).map(move |row| {
        row.map(move |view| match view {
            CellView::Empty => RevealedCell::Empty,
            CellView::Miss => RevealedCell::Shot,
            CellView::Ship(kind) => RevealedCell::NotShot(ShipAbbreviation(kind)),
            CellView::Hit(kind) if game.stats(player).is_sunk(kind) => {
                RevealedCell::Sunk(ShipAbbreviation(kind))
            }
            CellView::Hit(kind) => RevealedCell::Hit(ShipAbbreviation(kind)),
        })
    })
}

/// Rows of a player's board as their opponent may see it.
fn hidden_rows<'a>(
    game: &'a GameState,
    player: Player,
) -> impl 'a + Iterator<Item = impl 'a + Iterator<Item = HiddenCell>> {
    cell_rows(game, player).map(move |row| {
        row.map(move |view| match view.concealed() {
            CellView::Miss => HiddenCell::Miss,
            CellView::Hit(kind) if game.stats(player).is_sunk(kind) => {
                HiddenCell::Sunk(ShipAbbreviation(kind))
            }
            CellView::Hit(kind) => HiddenCell::Hit(ShipAbbreviation(kind)),
            CellView::Empty | CellView::Ship(_) => HiddenCell::NotShot,
        })
    })
}

/// Views of every cell of a player's board, row by row.
fn cell_rows<'a>(
    game: &'a GameState,
    player: Player,
) -> impl 'a + Iterator<Item = impl 'a + Iterator<Item = CellView>> {
    (0..GRID_SIZE).map(move |row| {
        (0..GRID_SIZE).filter_map(move |col| {
            Coordinate::new(row, col).map(|coord| game.cell_view(player, coord))
        })
    })
}

enum RevealedCell {
    Empty,
    Shot,
    NotShot(ShipAbbreviation),
    Hit(ShipAbbreviation),
    Sunk(ShipAbbreviation),
}

impl fmt::Display for RevealedCell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RevealedCell::Empty => f.pad("~~"),
            RevealedCell::Shot => f.pad("o"),
            RevealedCell::NotShot(ship) => fmt::Display::fmt(ship, f),
            RevealedCell::Hit(ship) => f.pad(&format!("x{}", ship.abbrev())),
            RevealedCell::Sunk(ship) => f.pad(&format!("X{}", ship.abbrev())),
        }
    }
}

enum HiddenCell {
    NotShot,
    Miss,
    Hit(ShipAbbreviation),
    Sunk(ShipAbbreviation),
}

impl fmt::Display for HiddenCell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HiddenCell::NotShot => f.pad("~~"),
            HiddenCell::Miss => f.pad("o"),
            // Which ship was hit is only revealed once it sinks.
            HiddenCell::Hit(_) => f.pad("x"),
            HiddenCell::Sunk(ship) => f.pad(&format!("X{}", ship.abbrev())),
        }
    }
}

/// Show the board by printing the grid. Takes an iterator over the rows of iterators over
/// the items
fn show_board(rows: impl Iterator<Item = impl Iterator<Item = impl fmt::Display>>) {
    print!("   ");
    for col in 0..GRID_SIZE {
        print!("{:^4}", column_letter(col).unwrap_or(' '));
    }
    println!();
    for (i, row) in rows.enumerate() {
        print!("{:>2} ", i + 1);
        for cell in row {
            print!("{:^4}", cell);
        }
        println!();
    }
}

/// Display helper that prints the ship's placement letter.
struct ShipAbbreviation(ShipKind);

impl ShipAbbreviation {
    fn abbrev(&self) -> char {
        self.0.letter()
    }
}

impl fmt::Display for ShipAbbreviation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(&self.abbrev().to_string())
    }
}

/// Scroll the previous player's board out of view.
fn clear_screen() {
    print!("\x1B[2J\x1B[H");
    let _ = io::stdout().flush();
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`.
    fn read_input<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Print the prompt and wait for the player to press Enter.
    fn wait(&mut self, prompt: &str) -> io::Result<()> {
        self.read_input_inner(prompt)
    }

    /// Helper to print the prompt, clear the string buffer and read a line.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        Ok(())
    }
}

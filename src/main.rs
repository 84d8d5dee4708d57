use std::process;

use clap::{App, Arg};

use sokoban_search::config::Strategy;
use sokoban_search::{LoadLevel, Solve};

fn main() {
    env_logger::init();

    let matches = App::new("sokoban-search")
        .about("Solves Sokoban levels using graph search")
        .arg(
            Arg::with_name("strategy")
                .short("s")
                .long("strategy")
                .takes_value(true)
                .default_value("bfs")
                .help("search strategy: bfs, dfs, ucs, greedy or astar"),
        )
        .arg(
            Arg::with_name("boards")
                .short("b")
                .long("boards")
                .help("print the board after every move of the solution"),
        )
        .arg(
            Arg::with_name("status")
                .long("status")
                .help("print statistics whenever the search reaches a new depth"),
        )
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let strategy: Strategy = matches
        .value_of("strategy")
        .unwrap()
        .parse()
        .unwrap_or_else(|err| {
            eprintln!("{}", err);
            process::exit(1);
        });
    let path = matches.value_of("file").unwrap();

    let level = path.load_level().unwrap_or_else(|err| {
        eprintln!("Can't load level {}: {}", path, err);
        process::exit(1);
    });

    println!("Solving {} using {}...", path, strategy);
    let solution = level.solve(strategy, matches.is_present("status"));
    match solution.moves {
        Some(ref moves) => {
            println!("Found solution:");
            println!("{}", moves);
            println!("Moves: {}", moves.move_cnt());
            println!("Pushes: {}", moves.push_cnt());
            if matches.is_present("boards") {
                println!();
                print!("{}", level.solution(moves, true));
            }
        }
        None => println!("No solution"),
    }
    println!();
    print!("{}", solution.stats);
}

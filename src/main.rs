use {
    ::burrow::*,
    std::io::{read_to_string, stdin},
};

fn print_min_sort_energy(input: &str) {
    match Burrow::try_from(input) {
        Ok(burrow) => {
            println!("{}", burrow.try_min_sort_energy().map_or(-1_i64, i64::from));
        }
        Err(error) => eprintln!("Failed to parse burrow:\n{error:#?}"),
    }
}

fn main() {
    let args: Args = Args::parse();

    match args.input_file_path() {
        Some(input_file_path) => {
            // SAFETY: This isn't truly safe, we're just hoping nobody touches our file before
            // we're done parsing it
            if let Err(error) = unsafe { open_utf8_file(input_file_path, print_min_sort_energy) } {
                eprintln!("Encountered error {error} when opening file \"{input_file_path}\"");
            }
        }
        None => match read_to_string(stdin()) {
            Ok(input) => print_min_sort_energy(&input),
            Err(error) => eprintln!("Encountered error {error} when reading standard input"),
        },
    }
}

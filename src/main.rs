fn main() {
    if let Err(err) = cfp_timeline::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

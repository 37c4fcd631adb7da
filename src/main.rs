fn main() {
    if let Err(err) = pvn_chart::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

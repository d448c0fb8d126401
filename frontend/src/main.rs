fn main() {
    passreset_frontend::start();
}

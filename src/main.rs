fn main() {
    blocks::app::startup::startup();
}

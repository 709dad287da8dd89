use refmt_core::{FormatOptions, FormatOutcome, FormatSession, HostBuffer, Selection};
use refmt_core_simple::WhitespaceFormatter;
use refmt_core_style::StyleRegistry;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = StyleRegistry::new();
    let formatter = WhitespaceFormatter::new();

    let mut host = HostBuffer::new(
        "#include <vector>\n#include <map>\n\n\n\nint x=1;\nint y  =2;   \n",
        vec![Selection::cursor(6, 4), Selection::cursor(6, 7)],
    );

    let mut session = FormatSession::new(&registry, &formatter, FormatOptions::new("LLVM"));
    let outcome = session.run(&host).unwrap();
    println!("{outcome}");
    host.apply(outcome);

    print!("{}", host.text);
    for selection in &host.selections {
        println!("cursor at {}:{}", selection.start.line, selection.start.column);
    }

    // A second pass finds nothing to do.
    let mut session = FormatSession::new(&registry, &formatter, FormatOptions::new("LLVM"));
    assert_eq!(session.run(&host).unwrap(), FormatOutcome::NoChangeNeeded);
}

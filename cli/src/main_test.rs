use super::*;
use ydyd_gate::Redirect;

#[test]
fn decision_json_allow() {
    let value = decision_json("/detail/1", Some("Detail"), &GuardDecision::Allow);
    assert_eq!(
        value,
        json!({ "path": "/detail/1", "route": "Detail", "decision": "allow", "redirect": null })
    );
}

#[test]
fn decision_json_redirect_renders_href() {
    let redirect = Redirect { path: "/".to_owned(), next: "/play/1".to_owned() };
    let value = decision_json("/play/1", Some("Player"), &GuardDecision::Redirect(redirect));
    assert_eq!(value["decision"], "redirect");
    assert_eq!(value["redirect"], "/?auth=1&next=%2Fplay%2F1");
}

#[test]
fn cli_parses_navigate_paths() {
    let cli = Cli::try_parse_from(["ydyd-cli", "navigate", "/play/1", "/detail/2"]).unwrap();
    let Command::Navigate(args) = cli.command else {
        panic!("expected navigate");
    };
    assert_eq!(args.paths, vec!["/play/1".to_owned(), "/detail/2".to_owned()]);
}

#[test]
fn cli_parses_forced_status() {
    let cli = Cli::try_parse_from(["ydyd-cli", "--base-url", "http://tv.local", "status", "--force"]).unwrap();
    assert_eq!(cli.base_url, "http://tv.local");
    assert!(matches!(cli.command, Command::Status { force: true }));
}

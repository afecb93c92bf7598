//! Integration tests for the NFS debug registration service
//!
//! These tests validate the complete registration lifecycle including:
//! - Root hierarchy setup and teardown
//! - Client and server directory registration
//! - Rollback on mandatory-child failure
//! - The failed-flag attribute endpoint

use core_types::{ClientId, ServerId};
use debug_tree::{CreateFailurePolicy, DebugTree, NodeKind};
use services_nfs_debug::{
    DebugRegistry, NfsClient, NfsServer, RegisterOutcome, RpcClientRef, SkipReason, TransitionHook,
};
use std::cell::RefCell;
use std::rc::Rc;

fn initialized() -> (DebugTree, DebugRegistry) {
    let mut tree = DebugTree::new();
    let mut registry = DebugRegistry::new();
    registry.initialize(&mut tree);
    assert!(registry.is_initialized());
    (tree, registry)
}

#[test]
fn test_client_register_unregister_leaves_no_trace() {
    let (mut tree, registry) = initialized();
    let client_root = registry.client_root().unwrap();
    let before = tree.children(client_root).unwrap();

    let mut client = NfsClient::new(ClientId::new(0x1a2b), RpcClientRef::registered("3"));
    let outcome = registry.register_client(&mut tree, &mut client);
    assert!(outcome.is_registered());

    registry.unregister_client(&mut tree, &mut client);

    assert_eq!(client.debug_dir(), None);
    assert_eq!(tree.children(client_root).unwrap(), before);
}

#[test]
fn test_client_directory_is_named_by_hex_id() {
    let (mut tree, registry) = initialized();

    let mut client = NfsClient::new(ClientId::new(0x1a2b), RpcClientRef::registered("3"));
    registry.register_client(&mut tree, &mut client);

    let client_root = registry.client_root().unwrap();
    let dir = tree.child(client_root, "1a2b").expect("directory named 1a2b");
    assert_eq!(client.debug_dir(), Some(dir));
    assert_eq!(tree.children(dir).unwrap(), vec!["failed", "rpc_client"]);

    let link = tree.child(dir, "rpc_client").unwrap();
    assert_eq!(tree.node_kind(link), Some(NodeKind::Symlink));
    assert_eq!(tree.symlink_target(link), Some("../../../sunrpc/rpc_clnt/3"));
}

#[test]
fn test_client_registration_is_idempotent() {
    let (mut tree, registry) = initialized();
    let mut client = NfsClient::new(ClientId::new(5), RpcClientRef::Unregistered);

    registry.register_client(&mut tree, &mut client);
    let creates_after_first = tree.create_count();

    let second = registry.register_client(&mut tree, &mut client);

    assert_eq!(
        second,
        RegisterOutcome::Skipped(SkipReason::AlreadyRegistered)
    );
    assert_eq!(tree.create_count(), creates_after_first);
}

#[test]
fn test_client_registration_skipped_before_initialize() {
    let mut tree = DebugTree::new();
    let registry = DebugRegistry::new();
    let mut client = NfsClient::new(ClientId::new(5), RpcClientRef::Unregistered);

    let outcome = registry.register_client(&mut tree, &mut client);

    assert_eq!(
        outcome,
        RegisterOutcome::Skipped(SkipReason::FacilityUnavailable)
    );
    assert_eq!(client.debug_dir(), None);
    assert!(tree.is_empty());
}

#[test]
fn test_client_with_too_wide_identifier_is_skipped() {
    let (mut tree, registry) = initialized();
    let client_root = registry.client_root().unwrap();

    let mut client = NfsClient::new(ClientId::new(0x1_0000_0000), RpcClientRef::Unregistered);
    let outcome = registry.register_client(&mut tree, &mut client);

    assert_eq!(
        outcome,
        RegisterOutcome::Skipped(SkipReason::IdentifierTooWide)
    );
    assert!(tree.children(client_root).unwrap().is_empty());
}

#[test]
fn test_attribute_file_failure_rolls_back_client_directory() {
    let (mut tree, registry) = initialized();
    tree.set_failure_policy(CreateFailurePolicy::OnNames(vec!["failed".to_string()]));

    let mut client = NfsClient::new(ClientId::new(0xabc), RpcClientRef::registered("3"));
    let outcome = registry.register_client(&mut tree, &mut client);

    assert_eq!(outcome, RegisterOutcome::Failed);
    assert_eq!(client.debug_dir(), None);

    let client_root = registry.client_root().unwrap();
    assert!(tree.children(client_root).unwrap().is_empty());
}

#[test]
fn test_duplicate_client_identifier_fails_second_registration() {
    let (mut tree, registry) = initialized();

    let mut first = NfsClient::new(ClientId::new(9), RpcClientRef::Unregistered);
    let mut second = NfsClient::new(ClientId::new(9), RpcClientRef::Unregistered);

    assert!(registry.register_client(&mut tree, &mut first).is_registered());
    let outcome = registry.register_client(&mut tree, &mut second);

    assert_eq!(outcome, RegisterOutcome::Failed);
    assert_eq!(second.debug_dir(), None);
}

#[test]
fn test_rpc_link_absence_is_tolerated_for_clients() {
    let (mut tree, registry) = initialized();

    let mut client = NfsClient::new(ClientId::new(4), RpcClientRef::Errored);
    let outcome = registry.register_client(&mut tree, &mut client);
    assert!(outcome.is_registered());

    let dir = client.debug_dir().unwrap();
    assert_eq!(tree.children(dir).unwrap(), vec!["failed"]);
}

#[test]
fn test_server_registration_with_registered_owner() {
    let (mut tree, registry) = initialized();

    let mut owner = NfsClient::new(ClientId::new(0x1a2b), RpcClientRef::registered("3"));
    registry.register_client(&mut tree, &mut owner);

    let mut server = NfsServer::new(
        ServerId::new(0xff),
        RpcClientRef::registered("7"),
        RpcClientRef::registered("8"),
    );
    let outcome = registry.register_server(&mut tree, &mut server, &owner);
    assert!(outcome.is_registered());

    let dir = server.debug_dir().unwrap();
    assert_eq!(
        tree.children(dir).unwrap(),
        vec!["nfs_client", "rpc_client", "rpc_client_acl"]
    );

    let back_link = tree.child(dir, "nfs_client").unwrap();
    assert_eq!(tree.symlink_target(back_link), Some("../../nfs_client/1a2b"));
    let acl_link = tree.child(dir, "rpc_client_acl").unwrap();
    assert_eq!(tree.symlink_target(acl_link), Some("../../../sunrpc/rpc_clnt/8"));
}

#[test]
fn test_server_before_owner_omits_back_link() {
    let (mut tree, registry) = initialized();

    let owner = NfsClient::new(ClientId::new(0x1a2b), RpcClientRef::Unregistered);
    let mut server = NfsServer::new(
        ServerId::new(0xff),
        RpcClientRef::registered("7"),
        RpcClientRef::Errored,
    );

    let outcome = registry.register_server(&mut tree, &mut server, &owner);
    assert!(outcome.is_registered());

    let dir = server.debug_dir().unwrap();
    assert_eq!(tree.children(dir).unwrap(), vec!["rpc_client"]);
}

#[test]
fn test_late_owner_registration_does_not_add_back_link() {
    let (mut tree, registry) = initialized();

    let mut owner = NfsClient::new(ClientId::new(0x1a2b), RpcClientRef::Unregistered);
    let mut server = NfsServer::new(
        ServerId::new(0xff),
        RpcClientRef::Unregistered,
        RpcClientRef::Unregistered,
    );
    registry.register_server(&mut tree, &mut server, &owner);

    // the owner shows up afterwards; the gap is accepted, never repaired
    registry.register_client(&mut tree, &mut owner);

    let dir = server.debug_dir().unwrap();
    assert_eq!(tree.child(dir, "nfs_client"), None);
}

#[test]
fn test_back_link_failure_rolls_back_server_directory() {
    let (mut tree, registry) = initialized();

    let mut owner = NfsClient::new(ClientId::new(0x1a2b), RpcClientRef::Unregistered);
    registry.register_client(&mut tree, &mut owner);

    tree.set_failure_policy(CreateFailurePolicy::OnNames(vec!["nfs_client".to_string()]));

    let mut server = NfsServer::new(
        ServerId::new(0xff),
        RpcClientRef::Unregistered,
        RpcClientRef::Unregistered,
    );
    let outcome = registry.register_server(&mut tree, &mut server, &owner);

    assert_eq!(outcome, RegisterOutcome::Failed);
    assert_eq!(server.debug_dir(), None);
    let server_root = registry.server_root().unwrap();
    assert!(tree.children(server_root).unwrap().is_empty());
}

#[test]
fn test_server_unregister_removes_whole_subtree() {
    let (mut tree, registry) = initialized();

    let mut owner = NfsClient::new(ClientId::new(1), RpcClientRef::registered("3"));
    registry.register_client(&mut tree, &mut owner);

    let mut server = NfsServer::new(
        ServerId::new(2),
        RpcClientRef::registered("7"),
        RpcClientRef::registered("8"),
    );
    registry.register_server(&mut tree, &mut server, &owner);
    let dir = server.debug_dir().unwrap();

    registry.unregister_server(&mut tree, &mut server);

    assert_eq!(server.debug_dir(), None);
    assert!(!tree.contains(dir));
    let server_root = registry.server_root().unwrap();
    assert!(tree.children(server_root).unwrap().is_empty());

    // idempotent
    registry.unregister_server(&mut tree, &mut server);
}

#[test]
fn test_failed_flag_round_trip_through_the_tree() {
    let (mut tree, registry) = initialized();

    let transitions = Rc::new(RefCell::new(Vec::new()));
    let recorder = Rc::clone(&transitions);
    let hook: TransitionHook = Rc::new(move |value| recorder.borrow_mut().push(value));

    let mut client =
        NfsClient::new(ClientId::new(0x2c), RpcClientRef::Unregistered).with_transition_hook(hook);
    registry.register_client(&mut tree, &mut client);

    let dir = client.debug_dir().unwrap();
    let file = tree.child(dir, "failed").unwrap();

    assert_eq!(tree.read_file(file).unwrap(), "N");

    tree.write_file(file, "yes").unwrap();
    assert_eq!(tree.read_file(file).unwrap(), "Y");
    assert!(client.is_failed());

    tree.write_file(file, "0").unwrap();
    assert_eq!(tree.read_file(file).unwrap(), "N");
    assert!(!client.is_failed());

    assert!(tree.write_file(file, "sideways").is_err());
    assert_eq!(tree.read_file(file).unwrap(), "N");

    assert_eq!(*transitions.borrow(), vec![true, false]);
}

#[test]
fn test_shutdown_tears_down_everything() {
    let (mut tree, mut registry) = initialized();

    let mut client = NfsClient::new(ClientId::new(1), RpcClientRef::Unregistered);
    registry.register_client(&mut tree, &mut client);

    registry.shutdown(&mut tree);

    assert!(tree.is_empty());
    assert_eq!(tree.root("nfs"), None);
    assert!(!registry.is_initialized());

    // registration after shutdown degrades to a silent skip
    let mut late = NfsClient::new(ClientId::new(2), RpcClientRef::Unregistered);
    assert_eq!(
        registry.register_client(&mut tree, &mut late),
        RegisterOutcome::Skipped(SkipReason::FacilityUnavailable)
    );
}

//! Property tests for traversal deduplication and sequential downloads.

mod common;

use std::collections::HashSet;

use common::Harness;
use proptest::prelude::*;
use vaultlink_client::ClientEvent;
use vaultlink_protocol::{AuthReply, AuthRequest, RequestKind};
use vaultlink_types::{FileItem, NetResult, NodeId, NodeRef};

fn arb_refs() -> impl Strategy<Value = Vec<Vec<(u32, u32)>>> {
    prop::collection::vec(prop::collection::vec((1u32..20, 1u32..20), 0..6), 1..8)
}

proptest! {
    #[test]
    fn every_node_is_fetched_at_most_once(batches in arb_refs()) {
        let mut h = Harness::new();
        h.connect();

        let mut mentioned = HashSet::new();
        let mut edges = 0usize;
        for batch in &batches {
            let trans_id = h.client.fetch_node_refs(NodeId(1)).unwrap();
            let refs: Vec<NodeRef> = batch
                .iter()
                .map(|&(p, c)| NodeRef::new(NodeId(p), NodeId(c), 0))
                .collect();
            for r in &refs {
                mentioned.insert(r.parent);
                mentioned.insert(r.child);
            }
            edges += refs.len();
            h.client.handle_reply(AuthReply::VaultNodeRefsFetched {
                trans_id,
                result: NetResult::Success,
                refs,
            });
        }

        let fetched: Vec<NodeId> = h
            .transport
            .sent_of(RequestKind::VaultNodeFetch)
            .into_iter()
            .map(|(_, req)| match req {
                AuthRequest::VaultNodeFetch { node_id } => node_id,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        let unique: HashSet<NodeId> = fetched.iter().copied().collect();

        prop_assert_eq!(fetched.len(), unique.len());
        prop_assert_eq!(unique, mentioned.clone());
        prop_assert_eq!(h.client.fetch_set().len(), mentioned.len());

        let forwarded = h
            .vault
            .ops()
            .into_iter()
            .filter(|op| matches!(op, vaultlink_nullables::VaultOp::AddRef(_)))
            .count();
        prop_assert_eq!(forwarded, edges);
    }

    #[test]
    fn downloads_are_strictly_sequential(
        sizes in prop::collection::vec(0u32..300, 0..5),
        chunk_size in 1usize..64,
    ) {
        let mut h = Harness::new();
        h.login();
        let files: Vec<FileItem> = sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| FileItem::new(format!("f{i}.sdl"), size))
            .collect();
        let list = h.last_trans(RequestKind::FileList);
        h.client.handle_reply(AuthReply::FileList {
            trans_id: list,
            result: NetResult::Success,
            files: files.clone(),
        });

        for (index, file) in files.iter().enumerate() {
            let requested = h.transport.sent_of(RequestKind::FileDownload);
            prop_assert_eq!(requested.len(), index + 1);
            let (trans_id, request) = requested[index].clone();
            prop_assert_eq!(
                request,
                AuthRequest::FileDownload { filename: file.name.clone() }
            );

            let content: Vec<u8> = (0..file.size).map(|b| (b % 251) as u8).collect();
            let mut offset = 0usize;
            loop {
                let end = (offset + chunk_size).min(content.len());
                h.client.handle_reply(AuthReply::FileDownloadChunk {
                    trans_id,
                    result: NetResult::Success,
                    total_size: file.size,
                    chunk_offset: offset as u32,
                    data: content[offset..end].to_vec(),
                });
                offset = end;
                if offset >= content.len() {
                    break;
                }
                // No new request while this file is incomplete.
                prop_assert_eq!(
                    h.transport.sent_of(RequestKind::FileDownload).len(),
                    index + 1
                );
            }
        }

        let delivered: Vec<(String, usize)> = h
            .drain()
            .into_iter()
            .filter_map(|event| match event {
                ClientEvent::FileDownloaded { name, data } => Some((name, data.into_inner().len())),
                _ => None,
            })
            .collect();
        let expected: Vec<(String, usize)> = files
            .iter()
            .map(|f| (f.name.clone(), f.size as usize))
            .collect();
        prop_assert_eq!(delivered, expected);
        prop_assert!(h.client.downloads().in_flight().is_none());
    }
}

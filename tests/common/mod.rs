//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use chat_commander::directory::{HttpServiceDirectory, ServiceDirectory};
use chat_commander::display::Display;
use chat_commander::group::{ChatGroup, TcpBroadcaster};
use chat_commander::membership::{HttpMembershipClient, MembershipConfig, MembershipDirectory};
use chat_commander::protocol::Member;
use chat_commander::Session;
use tokio::net::TcpListener;

#[derive(Default)]
pub struct RecordingDisplay {
    lines: Mutex<Vec<String>>,
}

impl RecordingDisplay {
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap())
    }
}

impl Display for RecordingDisplay {
    fn display_text(&self, text: &str) {
        self.lines.lock().unwrap().push(text.to_string());
    }

    fn quit(&self) {}
}

/// Bind a local listener and return it with its base URL.
pub async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    (listener, base)
}

pub fn serve(listener: TcpListener, app: Router) {
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
}

pub fn session(
    me: Member,
    membership_url: &str,
    directory_url: &str,
) -> (Session, Arc<RecordingDisplay>) {
    let client = reqwest::Client::new();
    let membership: Box<dyn MembershipDirectory> = Box::new(HttpMembershipClient::new(
        client.clone(),
        MembershipConfig {
            service_url: membership_url.to_string(),
            self_member: (&me).into(),
        },
    ));
    let directory: Box<dyn ServiceDirectory> =
        Box::new(HttpServiceDirectory::new(client, directory_url));
    let display = Arc::new(RecordingDisplay::default());
    let session = Session::new(
        ChatGroup::new(me, Box::new(TcpBroadcaster)),
        membership,
        directory,
        display.clone(),
        "/tmp/chat-commander-test.log",
    );
    (session, display)
}

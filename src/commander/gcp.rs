//! Membership synchronization against the remote membership directory.

use super::{pretty, trailing, trimmed_block, Session};
use crate::error::Result;
use crate::protocol::Member;

impl Session {
    pub(super) fn cmd_gcpconfig(&self, args: &[String]) -> Result<()> {
        let json = pretty("membership config", self.membership.config())?;
        self.emit(&trimmed_block("CMD_GCP_CONFIG", &json, &trailing(args)));
        Ok(())
    }

    pub(super) async fn cmd_gcplist(&self, args: &[String]) -> Result<()> {
        let members = match self.membership.list().await {
            Ok(members) => members,
            Err(e) => {
                self.report(format!("<CMD_GCP_LIST>: list call failed: {}", e));
                return Ok(());
            }
        };

        if members.is_empty() {
            self.emit("<CMD_GCP_LIST>: empty");
            return Ok(());
        }

        let json = pretty("membership list", &members)?;
        self.emit(&trimmed_block("CMD_GCP_LIST", &json, &trailing(args)));
        Ok(())
    }

    pub(super) async fn cmd_gcpreset(&self, args: &[String]) {
        let service_url = self.membership.config().service_url.clone();
        if let Err(e) = self.membership.reset(&service_url).await {
            self.report(format!("<CMD_GCP_RESET>: reset call failed: {}", e));
            return;
        }

        self.emit(&format!("<CMD_GCP_RESET>: done\n{}", trailing(args)));
    }

    /// Subscribe self and adopt the directory's membership as the local list.
    ///
    /// The local list is replaced before the broadcast and stays replaced if
    /// the broadcast fails.
    pub(super) async fn cmd_gcpsubscribe(&mut self, args: &[String]) {
        let members = match self.membership.subscribe().await {
            Ok(members) => members,
            Err(e) => {
                self.report(format!("<CMD_GCP_SUBSCRIBE>: subscribe call failed: {}", e));
                return;
            }
        };

        self.group.replace_memberlist(members.iter().map(Member::from));

        if let Err(e) = self.group.publish_subscriber_list().await {
            self.report(format!(
                "<CMD_GCP_SUBSCRIBE>: publishing subscriber list failed: {}",
                e
            ));
            return;
        }

        self.emit(&format!("<CMD_GCP_SUBSCRIBE>: done\n{}", trailing(args)));
    }

    /// A failed unsubscribe is reported, then `done` is printed regardless.
    pub(super) async fn cmd_gcpunsubscribe(&self, args: &[String]) {
        if let Err(e) = self.membership.unsubscribe().await {
            self.report(format!("<CMD_GCP_UNSUBSCRIBE>: unsubscribe call failed: {}", e));
        }

        self.emit(&format!("<CMD_GCP_UNSUBSCRIBE>: done\n{}", trailing(args)));
    }
}

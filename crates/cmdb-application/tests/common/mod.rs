#![allow(dead_code)]

use async_trait::async_trait;
use cmdb_core::api::{DashboardApi, HealthStatus};
use cmdb_core::faq::FaqMapping;
use cmdb_core::inventory::InventorySnapshot;
use cmdb_core::{CmdbError, Result};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

pub const SNAPSHOT: &str = r#"{
    "account_id": "123456789012",
    "region": "eu-west-2",
    "timestamp": "2024-11-20T10:15:00Z",
    "ec2_instances": [
        {"InstanceId": "i-1", "InstanceType": "t2.micro", "State": "running", "Tags": [],
         "SubnetId": "subnet-1", "VpcId": "vpc-2", "SecurityGroups": [{"GroupId": "sg-1"}]}
    ],
    "security_groups": [{"GroupId": "sg-1", "GroupName": "default", "VpcId": "vpc-2"}],
    "iam_configuration": {"Users": [], "Roles": []},
    "vpc_configuration": {
        "VPCs": [
            {"VpcId": "vpc-1", "CidrBlock": "10.0.0.0/16", "State": "available", "IsDefault": true},
            {"VpcId": "vpc-2", "CidrBlock": "10.1.0.0/16", "State": "available", "IsDefault": false}
        ],
        "Subnets": [
            {"SubnetId": "subnet-1", "CidrBlock": "10.1.1.0/24", "AvailabilityZone": "eu-west-2a", "VpcId": "vpc-2"}
        ]
    }
}"#;

/// Scriptable backend double.
///
/// Answers are served in order; when the queue is empty the question is
/// echoed back. With a gate installed, each question waits for one
/// `release()`.
#[derive(Default)]
pub struct FakeApi {
    pub faq: FaqMapping,
    pub faq_calls: AtomicUsize,
    pub snapshot_calls: AtomicUsize,
    pub questions: Mutex<Vec<String>>,
    answers: Mutex<VecDeque<Result<String>>>,
    gate: Option<Arc<Notify>>,
    fail_snapshot: bool,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_faq(mut self, pairs: &[(&str, &str)]) -> Self {
        self.faq = pairs
            .iter()
            .map(|(q, a)| (q.to_string(), a.to_string()))
            .collect();
        self
    }

    pub fn with_answers(self, answers: Vec<Result<String>>) -> Self {
        *self.answers.lock().unwrap() = answers.into();
        self
    }

    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn failing_snapshot(mut self) -> Self {
        self.fail_snapshot = true;
        self
    }

    pub fn faq_calls(&self) -> usize {
        self.faq_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn fetch_snapshot(&self) -> Result<InventorySnapshot> {
        self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_snapshot {
            return Err(CmdbError::api(
                Some(500),
                "AWS infrastructure data file not found",
            ));
        }
        Ok(serde_json::from_str(SNAPSHOT)?)
    }

    async fn fetch_faq(&self) -> Result<FaqMapping> {
        self.faq_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.faq.clone())
    }

    async fn ask_question(&self, message: &str) -> Result<String> {
        self.questions.lock().unwrap().push(message.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self.answers.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(format!("echo: {message}")))
    }

    async fn health(&self) -> Result<HealthStatus> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
            version: Some("1.0.0".to_string()),
        })
    }
}

//! Canned task outcomes
//!
//! Every "result" an agent reports is a lookup into this table. Unknown task
//! labels fall back to a generic outcome, so a lookup never fails.

use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcomes used when a task label has no entry
pub const GENERIC_OUTCOMES: [&str; 3] = ["分析完成", "建议已生成", "报告准备就绪"];

/// Task label → candidate outcome strings
///
/// # Example
/// ```
/// use agent_demo_core_rs::{ResultLookup, RngManager};
///
/// let lookup = ResultLookup::builtin();
/// let mut rng = RngManager::new(1);
///
/// let outcome = lookup.lookup("ROI分析", "评估人工智能芯片赛道的投资价值", &mut rng);
/// assert!(lookup.candidates("ROI分析").contains(&outcome));
///
/// let fallback = lookup.lookup("占卜", "明天会下雨吗", &mut rng);
/// assert!(["分析完成", "建议已生成", "报告准备就绪"].contains(&fallback.as_str()));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultLookup {
    outcomes: BTreeMap<String, Vec<String>>,
}

impl ResultLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table covering the task labels of the built-in catalogs
    pub fn builtin() -> Self {
        let mut lookup = Self::new();
        for (task, outcomes) in BUILTIN_OUTCOMES {
            lookup.insert(task, outcomes);
        }
        lookup
    }

    /// Add or replace the candidates for `task`
    pub fn insert(&mut self, task: &str, outcomes: &[&str]) {
        self.outcomes.insert(
            task.to_string(),
            outcomes.iter().map(|o| o.to_string()).collect(),
        );
    }

    /// Candidates for `task`, the generic list when unknown
    pub fn candidates(&self, task: &str) -> Vec<String> {
        match self.outcomes.get(task) {
            Some(list) if !list.is_empty() => list.clone(),
            _ => GENERIC_OUTCOMES.iter().map(|o| o.to_string()).collect(),
        }
    }

    pub fn contains(&self, task: &str) -> bool {
        self.outcomes.contains_key(task)
    }

    /// Pick one outcome for `task` uniformly at random
    ///
    /// `query` does not influence the pick; canned outcomes are per task.
    pub fn lookup(&self, task: &str, _query: &str, rng: &mut RngManager) -> String {
        let known = self.outcomes.get(task).filter(|list| !list.is_empty());
        match known {
            Some(list) => rng.pick(list).cloned().unwrap_or_default(),
            None => rng
                .pick(&GENERIC_OUTCOMES)
                .map(|o| o.to_string())
                .unwrap_or_default(),
        }
    }
}

const BUILTIN_OUTCOMES: &[(&str, &[&str])] = &[
    ("市场研究", &["市场规模：$2.3B", "增长率：15.2%", "竞争密度：中等"]),
    ("风险评估", &["风险等级：中等", "主要风险：技术", "建议对冲策略"]),
    ("ROI分析", &["预期ROI：18.5%", "回收期：2.1年", "净现值：+$1.2M"]),
    ("战略规划", &["核心策略：差异化", "时间线：18个月", "关键里程碑：3个"]),
    ("商业模式", &["收入模型：订阅制", "客户获取：B2B", "扩张路径：垂直整合"]),
    ("数据挖掘", &["关键洞察：7个", "数据质量：92%", "可信度：高"]),
    ("趋势分析", &["上升趋势：3个", "下降趋势：1个", "新兴机会：2个"]),
    ("竞争分析", &["主要对手：4家", "差异化空间：大", "价格压力：中等"]),
    ("团队优化", &["关键岗位：4个", "协作效率：+23%", "组织层级：精简1层"]),
    ("行情数据", &["覆盖标的：1,280只", "数据延迟：<1秒", "历史区间：10年"]),
    ("财报数据", &["财报样本：326份", "字段完整度：97%", "最新季度：已同步"]),
    ("行业报告", &["报告来源：42份", "覆盖行业：12个", "时效性：近6个月"]),
    ("经营指标", &["核心指标：18项", "同比变化：+8.4%", "异常指标：2项"]),
    ("创意洞察", &["洞察主题：5个", "用户痛点：9个", "灵感来源：3类"]),
    ("设计系统", &["组件数量：64个", "一致性评分：88%", "设计令牌：120个"]),
    ("用户体验", &["任务成功率：92%", "流程步骤：-3步", "满意度：4.6/5"]),
    ("创新方案", &["候选方案：3个", "可行性：高", "预计上线：8周"]),
    ("用户调研", &["访谈样本：36人", "问卷回收：1,024份", "关键画像：4类"]),
    ("设计素材", &["可用素材：1,500+", "品牌匹配度：高", "授权状态：已确认"]),
    ("合同审查", &["审查条款：48条", "高风险条款：3条", "建议修改：7处"]),
    ("合规检查", &["适用法规：6部", "合规差距：2项", "整改周期：4周"]),
    ("诉讼风险", &["胜诉概率：72%", "潜在赔偿：¥1.2M", "建议策略：和解优先"]),
    ("知识产权", &["相关专利：14项", "侵权可能：中等", "建议：提前布局"]),
    ("判例检索", &["相似判例：23件", "支持性判例：17件", "最新判例：2024年"]),
    ("法规检索", &["相关法规：11部", "最新修订：已纳入", "地方细则：5项"]),
];

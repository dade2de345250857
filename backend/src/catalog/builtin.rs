//! Built-in role data

use crate::models::role::{AgentDefinition, DeliveryMetrics, Layer, Role};

fn queries(items: &[&str]) -> Vec<String> {
    items.iter().map(|q| q.to_string()).collect()
}

/// The three-agent team of the single-layer dashboard
pub(super) fn classic_team() -> Role {
    Role {
        id: "team".to_string(),
        name: "AI协作团队".to_string(),
        agents: vec![
            AgentDefinition::new(
                "investor",
                "投资分析师",
                Layer::Core,
                &["市场研究", "风险评估", "ROI分析", "投资建议"],
            ),
            AgentDefinition::new(
                "strategist",
                "CEO战略家",
                Layer::Core,
                &["战略规划", "商业模式", "竞争分析", "决策制定"],
            ),
            AgentDefinition::new(
                "analyst",
                "数据分析师",
                Layer::Core,
                &["数据挖掘", "趋势分析", "报告生成", "可视化"],
            ),
        ],
        sample_queries: queries(&[
            "帮我分析一下电动汽车行业的投资机会",
            "制定一个新产品的市场进入策略",
            "评估我们公司的数字化转型方案",
            "分析竞争对手的商业模式优劣势",
        ]),
        delivery: DeliveryMetrics::new(
            "多Agent协作已为您生成专业分析报告",
            &[("参与Agent", "3"), ("完成任务", "3")],
        ),
    }
}

/// Roles of the layered dashboard, in selector order
pub(super) fn layered_roles() -> Vec<Role> {
    vec![investor(), ceo(), consultant(), legal()]
}

fn investor() -> Role {
    Role {
        id: "investor".to_string(),
        name: "投资分析师".to_string(),
        agents: vec![
            AgentDefinition::new("market_researcher", "市场研究员", Layer::Core, &["市场研究"]),
            AgentDefinition::new("risk_assessor", "风险评估师", Layer::Core, &["风险评估"]),
            AgentDefinition::new("roi_analyst", "ROI分析师", Layer::Professional, &["ROI分析"]),
            AgentDefinition::new(
                "trend_analyst",
                "趋势分析师",
                Layer::Professional,
                &["趋势分析", "数据挖掘"],
            ),
            AgentDefinition::new("market_feed", "行情数据源", Layer::DataSource, &["行情数据"]),
            AgentDefinition::new("filings_db", "财报数据库", Layer::DataSource, &["财报数据"]),
        ],
        sample_queries: queries(&[
            "帮我分析一下电动汽车行业的投资机会",
            "评估人工智能芯片赛道的投资价值",
            "分析新能源储能项目的风险与回报",
        ]),
        delivery: DeliveryMetrics::new(
            "投资分析报告已交付",
            &[
                ("ROI", "127%"),
                ("Risk", "Low"),
                ("Growth", "34.2%"),
                ("Score", "9.4/10"),
            ],
        ),
    }
}

fn ceo() -> Role {
    Role {
        id: "ceo".to_string(),
        name: "CEO战略家".to_string(),
        agents: vec![
            AgentDefinition::new("strategy_planner", "战略规划师", Layer::Core, &["战略规划"]),
            AgentDefinition::new("model_designer", "商业模式设计师", Layer::Core, &["商业模式"]),
            AgentDefinition::new(
                "competition_analyst",
                "竞争分析师",
                Layer::Professional,
                &["竞争分析"],
            ),
            AgentDefinition::new("team_optimizer", "组织效能顾问", Layer::Professional, &["团队优化"]),
            AgentDefinition::new("industry_reports", "行业报告库", Layer::DataSource, &["行业报告"]),
            AgentDefinition::new("operating_kpis", "经营指标源", Layer::DataSource, &["经营指标"]),
        ],
        sample_queries: queries(&[
            "制定一个新产品的市场进入策略",
            "评估我们公司的数字化转型方案",
            "分析竞争对手的商业模式优劣势",
        ]),
        delivery: DeliveryMetrics::new(
            "战略规划方案已交付",
            &[
                ("市场分析", "已完成"),
                ("团队优化", "3项建议"),
                ("创新驱动", "2个方向"),
                ("执行策略", "18个月路线图"),
            ],
        ),
    }
}

fn consultant() -> Role {
    Role {
        id: "consultant".to_string(),
        name: "顾问设计师".to_string(),
        agents: vec![
            AgentDefinition::new("insight_lead", "创意洞察师", Layer::Core, &["创意洞察"]),
            AgentDefinition::new("design_system", "设计系统专家", Layer::Core, &["设计系统"]),
            AgentDefinition::new("ux_expert", "用户体验专家", Layer::Professional, &["用户体验"]),
            AgentDefinition::new("innovation", "创新方案师", Layer::Professional, &["创新方案"]),
            AgentDefinition::new("user_research", "用户调研库", Layer::DataSource, &["用户调研"]),
            AgentDefinition::new("design_assets", "设计素材库", Layer::DataSource, &["设计素材"]),
        ],
        sample_queries: queries(&[
            "为我们的移动应用设计一套新的品牌体验",
            "优化电商网站的用户购买流程",
            "提出三个提升会员留存的创新方案",
        ]),
        delivery: DeliveryMetrics::new(
            "设计咨询方案已交付",
            &[
                ("创意洞察", "95%"),
                ("设计系统", "88%"),
                ("用户体验", "92%"),
                ("创新方案", "97%"),
            ],
        ),
    }
}

fn legal() -> Role {
    Role {
        id: "legal".to_string(),
        name: "法律专家".to_string(),
        agents: vec![
            AgentDefinition::new("contract_reviewer", "合同审查员", Layer::Core, &["合同审查"]),
            AgentDefinition::new("compliance_advisor", "合规顾问", Layer::Core, &["合规检查"]),
            AgentDefinition::new(
                "litigation_analyst",
                "诉讼风险分析师",
                Layer::Professional,
                &["诉讼风险"],
            ),
            AgentDefinition::new("ip_counsel", "知识产权顾问", Layer::Professional, &["知识产权"]),
            AgentDefinition::new("case_law", "判例数据库", Layer::DataSource, &["判例检索"]),
            AgentDefinition::new("statutes", "法规数据库", Layer::DataSource, &["法规检索"]),
        ],
        sample_queries: queries(&[
            "审查这份供应商合同的潜在风险",
            "评估跨境数据传输的合规要求",
            "分析我们的专利被侵权后的应对策略",
        ]),
        delivery: DeliveryMetrics::new(
            "法律意见书已交付",
            &[
                ("审查条款", "48"),
                ("风险点", "5"),
                ("合规评分", "8.7/10"),
                ("节省工时", "12小时"),
            ],
        ),
    }
}
